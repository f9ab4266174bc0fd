use crate::core::record::{Record, pad_records};
use crate::core::schema::Schema;
use crate::engine::visibility::Visibility;
use std::cell::RefCell;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Scroll position and column selection.
///
/// `current_line` indexes the filtered sequence of visible records and is the
/// top line of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub current_line: usize,
    pub current_field: Option<usize>,
}

#[derive(Debug)]
struct FilteredView {
    visibility: Visibility,
    indices: Vec<usize>,
}

/// Owns the loaded records, their schema and the cursor.
///
/// The record sequence always ends with exactly one sentinel. Visible-record
/// queries share a cache of the filtered index sequence, keyed on the
/// [`Visibility`] value that produced it.
#[derive(Debug)]
pub struct RecordStore {
    name: String,
    records: Vec<Record>,
    schema: Schema,
    cursor: Cursor,
    view_cache: RefCell<Option<FilteredView>>,
}

impl RecordStore {
    pub fn new(name: impl Into<String>, records: Vec<Record>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            records: Self::with_sentinel(records),
            schema,
            cursor: Cursor::default(),
            view_cache: RefCell::new(None),
        }
    }

    /// Replaces the contents and resets the cursor.
    pub fn load(&mut self, records: Vec<Record>, schema: Schema) {
        self.records = Self::with_sentinel(records);
        self.schema = schema;
        self.cursor = Cursor::default();
        *self.view_cache.get_mut() = None;
        debug!(records = self.records.len(), "Loaded records into store.");
    }

    /// Keeps a single sentinel, at the end.
    fn with_sentinel(mut records: Vec<Record>) -> Vec<Record> {
        let sentinels = records.iter().filter(|r| r.is_sentinel()).count();
        if sentinels == 1 && records.last().is_some_and(Record::is_sentinel) {
            return records;
        }
        warn!(sentinels, "Record set lacks a single trailing sentinel, repairing.");
        records.retain(|r| !r.is_sentinel());
        records.push(Record::sentinel());
        pad_records(&mut records);
        records
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Width of the padded records.
    pub fn record_width(&self) -> usize {
        self.records.first().map_or(0, Record::width)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_current_line(&mut self, line: usize) {
        self.cursor.current_line = line;
    }

    pub fn set_current_field(&mut self, field: Option<usize>) {
        self.cursor.current_field = field;
    }

    fn with_view<R>(&self, visibility: &Visibility, f: impl FnOnce(&[usize]) -> R) -> R {
        let mut cache = self.view_cache.borrow_mut();
        if cache
            .as_ref()
            .is_none_or(|view| view.visibility != *visibility)
        {
            let indices: Vec<usize> = self
                .records
                .iter()
                .enumerate()
                .filter(|(_, record)| visibility.accepts(record))
                .map(|(index, _)| index)
                .collect();
            *cache = Some(FilteredView {
                visibility: visibility.clone(),
                indices,
            });
        }
        match cache.as_ref() {
            Some(view) => f(&view.indices),
            None => f(&[]),
        }
    }

    #[cfg(test)]
    fn cached_indices_ptr(&self) -> Option<*const usize> {
        self.view_cache
            .borrow()
            .as_ref()
            .map(|view| view.indices.as_ptr())
    }

    /// Number of records accepted by `visibility`, the sentinel included.
    pub fn visible_count(&self, visibility: &Visibility) -> usize {
        self.with_view(visibility, <[usize]>::len)
    }

    /// Up to `count` visible records, starting at the `start`-th visible one.
    pub fn window(&self, visibility: &Visibility, start: usize, count: usize) -> Vec<&Record> {
        self.with_view(visibility, |indices| {
            indices
                .iter()
                .skip(start)
                .take(count)
                .map(|&index| &self.records[index])
                .collect()
        })
    }

    /// Position of record `record_index` within the visible sequence, if it is
    /// visible.
    pub fn position_of(&self, visibility: &Visibility, record_index: usize) -> Option<usize> {
        self.with_view(visibility, |indices| indices.binary_search(&record_index).ok())
    }

    /// Index into [`records`](Self::records) of the `visible_index`-th visible
    /// record.
    pub fn record_index_at(&self, visibility: &Visibility, visible_index: usize) -> Option<usize> {
        self.with_view(visibility, |indices| indices.get(visible_index).copied())
    }

    #[inline]
    pub fn field_at(&self, column: usize) -> Option<usize> {
        self.schema.field_at(column)
    }

    /// Sorted distinct non-empty values of `field_name` over atom and
    /// heteroatom records. Unknown fields yield an empty list.
    pub fn unique_values(&self, field_name: &str) -> Vec<String> {
        let Some((_, field)) = self.schema.field_by_name(field_name) else {
            return Vec::new();
        };
        self.records
            .iter()
            .filter_map(|record| record.field_value(field))
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}
