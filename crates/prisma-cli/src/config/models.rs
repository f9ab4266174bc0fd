use molprisma::core::constants::FormatConstants;
use molprisma::engine::config::ViewerConfig;

/// A key that cycles one filter: lowercase forward, uppercase backward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKey {
    pub key: char,
    pub filter: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub viewer: ViewerConfig,
    pub filter_keys: Vec<FilterKey>,
    pub constants: FormatConstants,
}
