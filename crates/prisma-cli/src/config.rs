mod defaults;
mod models;

pub use models::{AppConfig, FilterKey};

use crate::cli::Cli;
use crate::error::{CliError, Result};
use defaults::{DEFAULT_FILTERS, RESERVED_KEYS, default_config_path};
use molprisma::core::constants::FormatConstants;
use molprisma::engine::config::{FilterSpec, ViewerConfigBuilder};
use molprisma::engine::visibility::KindToggles;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDisplayConfig {
    show_meta: Option<bool>,
    show_atom: Option<bool>,
    show_hetero: Option<bool>,
    fast_scroll: Option<usize>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct PartialFilterConfig {
    name: String,
    field: String,
    key: char,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    display: Option<PartialDisplayConfig>,
    filters: Option<Vec<PartialFilterConfig>>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reads the file named by `--config`, else the default location when it
    /// exists, else starts empty.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                info!("Using configuration file at {:?}", path);
                Self::from_file(&path)
            }
            _ => {
                debug!("No configuration file found, using built-in defaults.");
                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli(mut self, cli: &Cli) -> Result<AppConfig> {
        self.apply_set_values(&cli.set_values)?;

        let display = self.display.take().unwrap_or_default();
        let defaults = KindToggles::default();
        let toggles = KindToggles {
            show_meta: display.show_meta.unwrap_or(defaults.show_meta),
            show_atom: display.show_atom.unwrap_or(defaults.show_atom),
            show_hetero: display.show_hetero.unwrap_or(defaults.show_hetero),
        };

        let filters = self.filters.take().unwrap_or_else(|| {
            DEFAULT_FILTERS
                .iter()
                .map(|f| PartialFilterConfig {
                    name: f.name.to_string(),
                    field: f.field.to_string(),
                    key: f.key,
                })
                .collect()
        });
        let filter_keys = Self::validate_filter_keys(&filters)?;

        let mut builder = ViewerConfigBuilder::new()
            .default_toggles(toggles)
            .filters(
                filters
                    .into_iter()
                    .map(|f| FilterSpec::new(f.name, f.field))
                    .collect(),
            );
        if let Some(lines) = display.fast_scroll {
            builder = builder.fast_scroll(lines);
        }
        let viewer = builder.build()?;

        let constants = match &cli.schema {
            Some(path) => {
                info!("Loading column constants from {:?}", path);
                FormatConstants::load(path)?
            }
            None => FormatConstants::pdb(),
        };

        Ok(AppConfig {
            viewer,
            filter_keys,
            constants,
        })
    }

    fn validate_filter_keys(filters: &[PartialFilterConfig]) -> Result<Vec<FilterKey>> {
        let mut keys: Vec<FilterKey> = Vec::with_capacity(filters.len());
        for filter in filters {
            let key = filter.key.to_ascii_lowercase();
            if !key.is_ascii_lowercase() {
                return Err(CliError::Config(format!(
                    "Filter '{}' must be bound to a letter, got '{}'.",
                    filter.name, filter.key
                )));
            }
            if RESERVED_KEYS.contains(&key) {
                return Err(CliError::Config(format!(
                    "Key '{}' of filter '{}' is reserved for a viewer action.",
                    key, filter.name
                )));
            }
            if let Some(taken) = keys.iter().find(|k| k.key == key) {
                return Err(CliError::Config(format!(
                    "Key '{}' is bound to both '{}' and '{}'.",
                    key, taken.filter, filter.name
                )));
            }
            keys.push(FilterKey {
                key,
                filter: filter.name.clone(),
            });
        }
        Ok(keys)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let display = self.display.get_or_insert_with(Default::default);
            let parse_bool = || {
                value_str.parse::<bool>().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })
            };

            match key {
                "display.show-meta" => display.show_meta = Some(parse_bool()?),
                "display.show-atom" => display.show_atom = Some(parse_bool()?),
                "display.show-hetero" => display.show_hetero = Some(parse_bool()?),
                "display.fast-scroll" => {
                    display.fast_scroll = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Resolves the full application configuration from the command line.
pub fn load(cli: &Cli) -> Result<AppConfig> {
    PartialAppConfig::discover(cli.config.as_deref())?.merge_with_cli(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn cli_with(extra: &[&str]) -> Cli {
        let mut args = vec!["molprisma", "fields"];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn empty_config_uses_built_in_defaults() {
        let config = PartialAppConfig::default().merge_with_cli(&cli_with(&[])).unwrap();

        assert_eq!(config.viewer.default_toggles, KindToggles::default());
        assert_eq!(config.viewer.fast_scroll, None);
        let names: Vec<_> = config.viewer.filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["chain", "element", "residue"]);
        let keys: Vec<_> = config.filter_keys.iter().map(|k| k.key).collect();
        assert_eq!(keys, ['c', 'e', 'r']);
        assert_eq!(config.constants, FormatConstants::pdb());
    }

    #[test]
    fn file_values_are_loaded() {
        let path = write_config_file(
            "display.toml",
            r#"
            [display]
            show-meta = true
            fast-scroll = 12

            [[filters]]
            name = "altloc"
            field = "ALT_LOC"
            key = "l"
            "#,
        );
        let config = PartialAppConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&cli_with(&[]))
            .unwrap();

        assert!(config.viewer.default_toggles.all_shown());
        assert_eq!(config.viewer.fast_scroll, Some(12));
        assert_eq!(config.viewer.filters, [FilterSpec::new("altloc", "ALT_LOC")]);
        assert_eq!(
            config.filter_keys,
            [FilterKey {
                key: 'l',
                filter: "altloc".into()
            }]
        );
    }

    #[test]
    fn set_values_override_the_file() {
        let path = write_config_file(
            "override.toml",
            "[display]\nshow-atom = true\nfast-scroll = 3\n",
        );
        let cli = cli_with(&["-S", "display.show-atom=false", "-S", "display.fast-scroll=9"]);
        let config = PartialAppConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&cli)
            .unwrap();

        assert!(!config.viewer.default_toggles.show_atom);
        assert_eq!(config.viewer.fast_scroll, Some(9));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = write_config_file("unknown.toml", "[display]\ncolour = \"red\"\n");
        assert!(matches!(
            PartialAppConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));

        let cli = cli_with(&["-S", "display.colour=red"]);
        assert!(matches!(
            PartialAppConfig::default().merge_with_cli(&cli),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["display.show-meta", "display.show-meta=maybe", "display.fast-scroll=-1"] {
            let cli = cli_with(&["-S", bad]);
            assert!(
                matches!(
                    PartialAppConfig::default().merge_with_cli(&cli),
                    Err(CliError::Config(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn zero_fast_scroll_is_a_config_error() {
        let cli = cli_with(&["-S", "display.fast-scroll=0"]);
        assert!(matches!(
            PartialAppConfig::default().merge_with_cli(&cli),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn filter_keys_must_be_free_letters() {
        let reserved = PartialFilterConfig {
            name: "chain".into(),
            field: "CHAIN_ID".into(),
            key: 'Q',
        };
        let digit = PartialFilterConfig {
            key: '1',
            ..reserved.clone()
        };
        let first = PartialFilterConfig {
            key: 'c',
            ..reserved.clone()
        };
        let clash = PartialFilterConfig {
            name: "element".into(),
            field: "ELEMENT".into(),
            key: 'C',
        };

        assert!(PartialAppConfig::validate_filter_keys(&[reserved]).is_err());
        assert!(PartialAppConfig::validate_filter_keys(&[digit]).is_err());
        assert!(PartialAppConfig::validate_filter_keys(&[first, clash]).is_err());
    }

    #[test]
    fn schema_flag_loads_custom_constants() {
        let path = write_config_file(
            "columns.toml",
            "record-width = 20\n[columns]\nTAG_START = 0\nTAG_END = 4\n",
        );
        let cli = cli_with(&["--schema", path.to_str().unwrap()]);
        let config = PartialAppConfig::default().merge_with_cli(&cli).unwrap();
        assert_eq!(config.constants.record_width(), 20);
        assert_eq!(config.constants.get("TAG_END"), Some(4));
    }

    #[test]
    fn missing_explicit_config_is_an_io_error() {
        let missing = TEST_DIR.path().join("absent.toml");
        assert!(matches!(
            PartialAppConfig::discover(Some(&missing)),
            Err(CliError::Io(_))
        ));
    }
}
