use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

use crate::error::{Error, Result};

/// Read-only view of a whole input file.
///
/// The file handle is closed as soon as the mapping exists; the mapping itself is released
/// on drop. Empty files carry no mapping at all.
pub struct MappedFile {
    map: Option<Mmap>,
}

impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let size = file
            .metadata()
            .map_err(|source| Error::Stat {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        if size == 0 {
            return Ok(Self { map: None });
        }

        let len = usize::try_from(size).map_err(|_| Error::Map {
            path: path.to_path_buf(),
            source: std::io::Error::other("file does not fit in the address space"),
        })?;

        // SAFETY: the mapping is read-only and the input is not modified while we run.
        let map = unsafe { MmapOptions::new().len(len).map(&file) }.map_err(|source| Error::Map {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(unix)]
        {
            if let Err(e) = map.advise(memmap2::Advice::Sequential) {
                log::debug!("madvise(sequential) ignored for {}: {e}", path.display());
            }
        }

        Ok(Self { map: Some(map) })
    }

    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
