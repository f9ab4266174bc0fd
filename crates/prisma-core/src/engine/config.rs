use crate::engine::visibility::KindToggles;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// A categorical filter to register at startup: display name and the schema
/// field it selects on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: String,
    pub field: String,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}

/// Chain, element and residue filters over the PDB columns.
pub fn standard_filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::new("chain", "CHAIN_ID"),
        FilterSpec::new("element", "ELEMENT"),
        FilterSpec::new("residue", "RES_NAME"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Toggles at startup and after a reset.
    pub default_toggles: KindToggles,
    pub filters: Vec<FilterSpec>,
    /// Page-scroll step; half the viewport when unset.
    pub fast_scroll: Option<usize>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_toggles: KindToggles::default(),
            filters: standard_filters(),
            fast_scroll: None,
        }
    }
}

#[derive(Default)]
pub struct ViewerConfigBuilder {
    default_toggles: Option<KindToggles>,
    filters: Option<Vec<FilterSpec>>,
    fast_scroll: Option<usize>,
}

impl ViewerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_toggles(mut self, toggles: KindToggles) -> Self {
        self.default_toggles = Some(toggles);
        self
    }
    pub fn filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = Some(filters);
        self
    }
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filters.get_or_insert_with(Vec::new).push(spec);
        self
    }
    pub fn fast_scroll(mut self, lines: usize) -> Self {
        self.fast_scroll = Some(lines);
        self
    }

    pub fn build(self) -> Result<ViewerConfig, ConfigError> {
        let filters = self
            .filters
            .ok_or(ConfigError::MissingParameter("filters"))?;
        if let Some(spec) = filters
            .iter()
            .find(|spec| spec.name.trim().is_empty() || spec.field.trim().is_empty())
        {
            return Err(ConfigError::InvalidParameter {
                parameter: "filters",
                reason: format!(
                    "filter name and field must be non-empty (got '{}' on '{}')",
                    spec.name, spec.field
                ),
            });
        }
        if self.fast_scroll == Some(0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "fast_scroll",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(ViewerConfig {
            default_toggles: self.default_toggles.unwrap_or_default(),
            filters,
            fast_scroll: self.fast_scroll,
        })
    }
}
