use crate::core::record::Record;
use crate::core::schema::{Schema, SchemaError, SchemaField};
use crate::engine::error::ViewerError;
use crate::engine::store::RecordStore;
use crate::engine::utils::cyclic::step_cyclic;
use tracing::debug;

/// Handle to a registered filter, valid for the engine that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterId(usize);

/// An exact-match constraint on one field, produced by an active filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPin {
    field: SchemaField,
    value: String,
}

impl FieldPin {
    pub fn new(field: SchemaField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn field(&self) -> &SchemaField {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Records without fields (metadata, sentinel) never match.
    pub fn matches(&self, record: &Record) -> bool {
        record.field_value(&self.field) == Some(self.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    name: String,
    field: SchemaField,
    reference_values: Vec<String>,
    selected: Option<usize>,
}

impl Filter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_name(&self) -> &str {
        &self.field.name
    }

    pub fn field(&self) -> &SchemaField {
        &self.field
    }

    pub fn reference_values(&self) -> &[String] {
        &self.reference_values
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.reference_values.get(i))
            .map(String::as_str)
    }

    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    pub fn pin(&self) -> Option<FieldPin> {
        self.selected_value()
            .map(|value| FieldPin::new(self.field.clone(), value))
    }

    fn cycle(&mut self, forward: bool) {
        self.selected = step_cyclic(self.selected, self.reference_values.len(), forward);
    }
}

/// The fixed set of named categorical filters.
///
/// Filters are registered once against a schema; their reference values are
/// derived from a [`RecordStore`] by [`refresh`](Self::refresh).
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    filters: Vec<Filter>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter on `field_name` with an empty reference set.
    ///
    /// # Errors
    ///
    /// [`ViewerError::DuplicateFilter`] if `name` is taken, or a configuration
    /// error if `schema` has no field called `field_name`.
    pub fn register(
        &mut self,
        name: &str,
        field_name: &str,
        schema: &Schema,
    ) -> Result<FilterId, ViewerError> {
        if self.filters.iter().any(|f| f.name == name) {
            return Err(ViewerError::DuplicateFilter {
                name: name.to_string(),
            });
        }
        let (_, field) = schema
            .field_by_name(field_name)
            .ok_or_else(|| SchemaError::UnknownField(field_name.to_string()))?;

        self.filters.push(Filter {
            name: name.to_string(),
            field: field.clone(),
            reference_values: Vec::new(),
            selected: None,
        });
        debug!(filter = name, field = field_name, "Registered filter.");
        Ok(FilterId(self.filters.len() - 1))
    }

    /// Recomputes every filter's reference values from `store`. Selections
    /// that fall outside the new value list are cleared.
    pub fn refresh(&mut self, store: &RecordStore) {
        for filter in &mut self.filters {
            filter.reference_values = store.unique_values(&filter.field.name);
            if filter
                .selected
                .is_some_and(|i| i >= filter.reference_values.len())
            {
                filter.selected = None;
            }
            debug!(
                filter = filter.name.as_str(),
                values = filter.reference_values.len(),
                "Refreshed filter reference values."
            );
        }
    }

    pub fn id_of(&self, name: &str) -> Result<FilterId, ViewerError> {
        self.filters
            .iter()
            .position(|f| f.name == name)
            .map(FilterId)
            .ok_or_else(|| ViewerError::InvalidFilterKey {
                name: name.to_string(),
            })
    }

    pub fn get(&self, id: FilterId) -> Option<&Filter> {
        self.filters.get(id.0)
    }

    pub fn by_name(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.name == name)
    }

    pub fn selected_value(&self, name: &str) -> Option<&str> {
        self.by_name(name).and_then(Filter::selected_value)
    }

    /// Steps the named filter's selection; a no-op when it has no values.
    pub fn cycle(&mut self, name: &str, forward: bool) -> Result<(), ViewerError> {
        let id = self.id_of(name)?;
        self.cycle_id(id, forward);
        Ok(())
    }

    pub fn cycle_id(&mut self, id: FilterId, forward: bool) {
        if let Some(filter) = self.filters.get_mut(id.0) {
            filter.cycle(forward);
            debug!(
                filter = filter.name.as_str(),
                selected = ?filter.selected_value(),
                "Cycled filter."
            );
        }
    }

    pub fn reset_all(&mut self) {
        for filter in &mut self.filters {
            filter.selected = None;
        }
    }

    pub fn any_active(&self) -> bool {
        self.filters.iter().any(Filter::is_active)
    }

    /// Whether `record` satisfies every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|filter| match filter.selected_value() {
            None => true,
            Some(value) => record.field_value(&filter.field) == Some(value),
        })
    }

    pub fn pins(&self) -> Vec<FieldPin> {
        self.filters.iter().filter_map(Filter::pin).collect()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
