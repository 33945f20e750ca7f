use std::hash::Hash;
use std::slice;

use rustc_hash::FxHashMap;

use crate::error::{DataError, RecordKey};

/// A record that can live in a [`TableIndex`].
pub trait TableRecord {
    type Key: Clone + Eq + Hash + Into<RecordKey>;

    fn key(&self) -> Self::Key;
}

/// A record that belongs to exactly one category.
pub trait Categorized {
    type Category: Copy + PartialEq;

    fn category(&self) -> Self::Category;
}

/// Immutable keyed table with insertion-ordered iteration.
pub struct TableIndex<R: TableRecord> {
    records: Vec<R>,
    /// Source row of each record, parallel to `records`.
    rows: Vec<usize>,
    by_key: FxHashMap<R::Key, usize>,
}

impl<R: TableRecord> Default for TableIndex<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rows: Vec::new(),
            by_key: FxHashMap::default(),
        }
    }
}

impl<R: TableRecord> TableIndex<R> {
    /// Builds the table or fails with every key collision found.
    ///
    /// Row numbers in errors are positions in `records`.
    pub fn build(records: impl IntoIterator<Item = R>) -> Result<Self, Vec<DataError>> {
        let mut builder = TableBuilder::new();
        let mut errors = Vec::new();
        for (row, record) in records.into_iter().enumerate() {
            if let Err(err) = builder.insert(row, record) {
                errors.push(err);
            }
        }
        if errors.is_empty() {
            Ok(builder.finish())
        } else {
            Err(errors)
        }
    }

    /// Keeps the first record of every key and returns the collisions alongside.
    pub fn build_lenient(records: impl IntoIterator<Item = R>) -> (Self, Vec<DataError>) {
        let mut builder = TableBuilder::new();
        let errors = records
            .into_iter()
            .enumerate()
            .filter_map(|(row, record)| builder.insert(row, record).err())
            .collect();
        (builder.finish(), errors)
    }

    pub fn builder() -> TableBuilder<R> {
        TableBuilder::new()
    }

    pub fn lookup(&self, key: &R::Key) -> Result<&R, DataError> {
        self.get(key).ok_or_else(|| DataError::not_found(key.clone()))
    }

    pub fn get(&self, key: &R::Key) -> Option<&R> {
        self.by_key.get(key).map(|&i| &self.records[i])
    }

    pub fn contains(&self, key: &R::Key) -> bool {
        self.by_key.contains_key(key)
    }

    /// Row the record was loaded from.
    pub fn source_row(&self, key: &R::Key) -> Option<usize> {
        self.by_key.get(key).map(|&i| self.rows[i])
    }

    pub fn all(&self) -> slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn filter<P>(&self, predicate: P) -> impl Iterator<Item = &R> + Clone
    where
        P: Fn(&R) -> bool + Clone,
    {
        self.records.iter().filter(move |r| predicate(*r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: TableRecord + Categorized> TableIndex<R> {
    pub fn filter_by_category(&self, category: R::Category) -> ByCategory<'_, R> {
        ByCategory {
            inner: self.records.iter(),
            category,
        }
    }
}

impl<'a, R: TableRecord> IntoIterator for &'a TableIndex<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

/// Insertion-ordered view over one category. Clone it before iterating to walk
/// the same sequence again.
pub struct ByCategory<'a, R: Categorized> {
    inner: slice::Iter<'a, R>,
    category: R::Category,
}

impl<R: Categorized> Clone for ByCategory<'_, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            category: self.category,
        }
    }
}

impl<'a, R: Categorized> Iterator for ByCategory<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        let category = self.category;
        self.inner.find(|r| r.category() == category)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Incremental construction; the finished table never changes again.
pub struct TableBuilder<R: TableRecord> {
    index: TableIndex<R>,
}

impl<R: TableRecord> TableBuilder<R> {
    pub fn new() -> Self {
        Self {
            index: TableIndex::default(),
        }
    }

    /// Adds `record`, or reports a collision and keeps the first definition.
    pub fn insert(&mut self, row: usize, record: R) -> Result<(), DataError> {
        let key = record.key();
        if let Some(&existing) = self.index.by_key.get(&key) {
            return Err(DataError::DuplicateKey {
                key: key.into(),
                first_row: self.index.rows[existing],
                row,
            });
        }
        self.index.by_key.insert(key, self.index.records.len());
        self.index.records.push(record);
        self.index.rows.push(row);
        Ok(())
    }

    pub fn contains(&self, key: &R::Key) -> bool {
        self.index.contains(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn finish(self) -> TableIndex<R> {
        self.index
    }
}

impl<R: TableRecord> Default for TableBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
