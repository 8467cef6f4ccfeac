use std::ops::Range;

use ahash::AHashMap;

use crate::parser::{Cents, Cursor};

pub const EXPECTED_NAMES: usize = 128;

/// Append-only name -> dense id table. Ids follow first-seen order.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    ids: AHashMap<Box<[u8]>, usize>,
    names: Vec<Box<[u8]>>,
}

impl Interner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: AHashMap::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn intern(&mut self, name: &[u8]) -> usize {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        let owned: Box<[u8]> = name.into();
        self.names.push(owned.clone());
        self.ids.insert(owned, id);
        id
    }

    pub fn get(&self, name: &[u8]) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: usize) -> &[u8] {
        &self.names[id]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.names.iter().map(|name| &name[..]).enumerate()
    }
}

/// Per-city totals and per-(city, product) minimums.
///
/// Used both as the private state of one worker and as the merged global result.
#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    cities: Interner,
    products: Interner,
    totals: Vec<Cents>,
    // minimums[city][product]; None until the pair has been seen.
    minimums: Vec<Vec<Option<Cents>>>,
    records: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            cities: Interner::with_capacity(EXPECTED_NAMES),
            products: Interner::with_capacity(EXPECTED_NAMES),
            ..Default::default()
        }
    }

    /// Parses every record whose first byte lies in `range` once aligned, and folds it in.
    /// Returns the number of records consumed.
    pub fn consume(&mut self, data: &[u8], range: Range<usize>) -> u64 {
        let end = range.end.min(data.len());
        let mut cursor = Cursor::new(data, range.start);
        cursor.align();

        let mut n = 0;
        loop {
            cursor.skip_blank_lines();
            if cursor.position() >= end {
                break;
            }
            let rec = cursor.next_record();
            self.record(rec.city, rec.product, rec.price);
            n += 1;
        }
        n
    }

    #[inline]
    pub fn record(&mut self, city: &[u8], product: &[u8], price: Cents) {
        let cid = self.cities.intern(city);
        let pid = self.products.intern(product);
        self.fold(cid, pid, price, price);
        self.records += 1;
    }

    #[inline]
    fn fold(&mut self, cid: usize, pid: usize, total: Cents, min: Cents) {
        if cid >= self.totals.len() {
            self.totals.resize(cid + 1, 0);
            self.minimums.resize_with(cid + 1, Vec::new);
        }
        self.totals[cid] += total;

        let row = &mut self.minimums[cid];
        if pid >= row.len() {
            row.resize(pid + 1, None);
        }
        let slot = &mut row[pid];
        *slot = Some(slot.map_or(min, |cur| cur.min(min)));
    }

    /// Folds another aggregator in, translating its ids into ours.
    pub fn absorb(&mut self, other: &Aggregator) {
        for (ocid, city) in other.cities.iter() {
            let cid = self.cities.intern(city);
            if cid >= self.totals.len() {
                self.totals.resize(cid + 1, 0);
                self.minimums.resize_with(cid + 1, Vec::new);
            }
            self.totals[cid] += other.totals[ocid];

            for (opid, min) in other.recorded_products(ocid) {
                let pid = self.products.intern(other.products.name(opid));
                self.fold(cid, pid, 0, min);
            }
        }
        self.records += other.records;
    }

    fn recorded_products(&self, cid: usize) -> impl Iterator<Item = (usize, Cents)> + '_ {
        self.minimums[cid]
            .iter()
            .enumerate()
            .filter_map(|(pid, min)| min.map(|m| (pid, m)))
    }

    /// `(name, total)` for every city, in id order.
    pub fn cities(&self) -> impl Iterator<Item = (&[u8], Cents)> {
        self.cities.iter().map(|(cid, name)| (name, self.totals[cid]))
    }

    /// `(product, minimum)` for every product recorded under `city`.
    pub fn products_of(&self, city: &[u8]) -> Vec<(&[u8], Cents)> {
        match self.cities.get(city) {
            Some(cid) => self
                .recorded_products(cid)
                .map(|(pid, min)| (self.products.name(pid), min))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn total(&self, city: &[u8]) -> Option<Cents> {
        self.cities.get(city).map(|cid| self.totals[cid])
    }

    pub fn minimum(&self, city: &[u8], product: &[u8]) -> Option<Cents> {
        let cid = self.cities.get(city)?;
        let pid = self.products.get(product)?;
        self.minimums[cid].get(pid).copied().flatten()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn records(&self) -> u64 {
        self.records
    }
}
