//! Ordered collections of records sharing a schema.

use crate::{DataSchema, Record};
use serde::Serialize;
use std::sync::Arc;

/// An ordered sequence of records.
///
/// Order is significant and duplicates are allowed. Query and transform
/// methods return new sets and leave the receiver untouched; only
/// [`RecordSet::add`] and [`RecordSet::set`] mutate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    /// Schema all records are expected to follow
    #[serde(skip)]
    pub schema: Option<Arc<DataSchema>>,
    /// Records in order
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty set for a schema.
    pub fn new(schema: Arc<DataSchema>) -> Self {
        Self {
            schema: Some(schema),
            records: Vec::new(),
        }
    }

    /// Create a set from existing records.
    pub fn from_records(schema: Option<Arc<DataSchema>>, records: Vec<Record>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> Option<&Arc<DataSchema>> {
        self.schema.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record.
    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Replace the record at `index`. Returns the previous record, or `None`
    /// (leaving the set unchanged) when the index is out of bounds.
    pub fn set(&mut self, index: usize, record: Record) -> Option<Record> {
        self.records
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Record at `index`, or `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// New set holding the records matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> RecordSet
    where
        F: Fn(&Record) -> bool,
    {
        self.derive(self.records.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// New set holding `transform` applied to every record.
    pub fn map<F>(&self, transform: F) -> RecordSet
    where
        F: Fn(&Record) -> Record,
    {
        self.derive(self.records.iter().map(transform).collect())
    }

    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&Record),
    {
        self.records.iter().for_each(f);
    }

    /// True if at least one record matches.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Record) -> bool,
    {
        self.records.iter().any(predicate)
    }

    /// True if every record matches. Vacuously true on an empty set.
    pub fn all<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Record) -> bool,
    {
        self.records.iter().all(predicate)
    }

    /// New set with at most the first `n` records.
    pub fn take(&self, n: usize) -> RecordSet {
        self.derive(self.records.iter().take(n).cloned().collect())
    }

    /// New set without the first `n` records.
    pub fn skip(&self, n: usize) -> RecordSet {
        self.derive(self.records.iter().skip(n).cloned().collect())
    }

    /// Fold the records in order, starting from `initial`.
    ///
    /// ```rust
    /// use recdiff_engine::{Record, RecordSet};
    ///
    /// let set = RecordSet::from_records(
    ///     None,
    ///     vec![
    ///         Record::unbound().with("quantity", 2i64),
    ///         Record::unbound().with("quantity", 5i64),
    ///     ],
    /// );
    /// let total = set.reduce(0i64, |acc, r| acc + r.get_int("quantity"));
    /// assert_eq!(total, 7);
    /// ```
    pub fn reduce<'a, A, F>(&'a self, initial: A, reducer: F) -> A
    where
        F: FnMut(A, &'a Record) -> A,
    {
        self.records.iter().fold(initial, reducer)
    }

    fn derive(&self, records: Vec<Record>) -> RecordSet {
        RecordSet {
            schema: self.schema.clone(),
            records,
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NativeType, SchemaColumn};

    fn product_set() -> RecordSet {
        let schema = DataSchema::new(
            "Product",
            vec![
                SchemaColumn::single("name", NativeType::String),
                SchemaColumn::single("quantity", NativeType::Int),
            ],
        )
        .shared();

        let mut set = RecordSet::new(schema.clone());
        for (name, quantity) in [("Laptop", 5i64), ("Phone", 0), ("Tablet", 12)] {
            set.add(
                Record::new(schema.clone())
                    .with("name", name)
                    .with("quantity", quantity),
            );
        }
        set
    }

    #[test]
    fn count_and_bounds() {
        let set = product_set();
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.first().unwrap().get_string("name"), "Laptop");
        assert_eq!(set.last().unwrap().get_string("name"), "Tablet");
        assert_eq!(set.get(1).unwrap().get_string("name"), "Phone");
        assert!(set.get(3).is_none());

        let empty = RecordSet::default();
        assert!(empty.is_empty());
        assert!(empty.first().is_none());
        assert!(empty.last().is_none());
    }

    #[test]
    fn filter_keeps_receiver() {
        let set = product_set();
        let in_stock = set.filter(|r| r.get_int("quantity") > 0);

        assert_eq!(in_stock.len(), 2);
        assert_eq!(set.len(), 3);
        assert_eq!(in_stock.schema(), set.schema());
    }

    #[test]
    fn map_transforms_copies() {
        let set = product_set();
        let doubled = set.map(|r| {
            let mut copy = r.clone();
            copy.set("quantity", r.get_int("quantity") * 2);
            copy
        });

        assert_eq!(doubled.get(2).unwrap().get_int("quantity"), 24);
        assert_eq!(set.get(2).unwrap().get_int("quantity"), 12);
    }

    #[test]
    fn predicates() {
        let set = product_set();
        assert!(set.any(|r| r.get_string("name") == "Phone"));
        assert!(!set.all(|r| r.get_int("quantity") > 0));
        assert!(RecordSet::default().all(|_| false));
        assert!(!RecordSet::default().any(|_| true));
    }

    #[test]
    fn take_and_skip() {
        let set = product_set();
        assert_eq!(set.take(2).len(), 2);
        assert_eq!(set.take(10).len(), 3);
        assert_eq!(set.skip(1).first().unwrap().get_string("name"), "Phone");
        assert!(set.skip(5).is_empty());
    }

    #[test]
    fn reduce_and_for_each() {
        let set = product_set();
        let total = set.reduce(0i64, |acc, r| acc + r.get_int("quantity"));
        assert_eq!(total, 17);

        let busiest = set.reduce(None::<&Record>, |acc, r| match acc {
            Some(best) if best.get_int("quantity") >= r.get_int("quantity") => Some(best),
            _ => Some(r),
        });
        assert_eq!(busiest.unwrap().get_string("name"), "Tablet");

        let mut names = Vec::new();
        set.for_each(|r| names.push(r.get_string("name").to_string()));
        assert_eq!(names, vec!["Laptop", "Phone", "Tablet"]);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut set = product_set();
        let previous = set.set(1, Record::unbound().with("name", "Watch"));
        assert_eq!(previous.unwrap().get_string("name"), "Phone");
        assert_eq!(set.get(1).unwrap().get_string("name"), "Watch");
        assert!(set.set(9, Record::unbound()).is_none());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn duplicates_allowed() {
        let mut set = product_set();
        let first = set.first().cloned().unwrap();
        set.add(first);
        assert_eq!(set.len(), 4);
        assert_eq!(set.first(), set.last());
    }
}
