//! Fixture helpers: test inputs live next to their expected reports as
//! `<name>.txt` / `<name>.out`.

use std::path::{Path, PathBuf};
use std::{fs, io};

pub fn read_file<P: AsRef<Path>>(file_name: P) -> String {
    fs::read_to_string(&file_name)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", file_name.as_ref().display()))
}

/// Fixture stems (path without extension) of every file under `root` ending in `ext`,
/// sorted so runs are reproducible.
pub fn find(root: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let wanted = ext.trim_start_matches('.');
    let mut res = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some(wanted) {
                res.push(path.with_extension(""));
            }
        }
    }

    res.sort();
    Ok(res)
}

/// Writes `contents` to a uniquely named file in the temp dir and returns its path.
pub fn scratch_file(tag: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{tag}-{}.txt", std::process::id()));
    fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    path
}
