use crate::core::constants::FormatConstants;
use crate::core::io::{read_lines_from_path, structure_name};
use crate::core::record::classify;
use crate::core::schema::Schema;
use crate::engine::config::ViewerConfig;
use crate::engine::controller::ViewController;
use crate::engine::error::ViewerError;
use crate::engine::filter::FilterEngine;
use crate::engine::store::RecordStore;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Builds a controller over `raw_lines`.
///
/// The schema is derived from `constants`, the lines are classified and
/// padded, and every filter in `config` is registered and given its reference
/// values.
///
/// # Errors
///
/// Fails on an invalid schema, empty input, or a filter that is duplicated or
/// names a field the schema lacks.
#[instrument(skip_all, name = "open_session", fields(name = %name))]
pub fn open<I, S>(
    name: &str,
    raw_lines: I,
    constants: &FormatConstants,
    config: &ViewerConfig,
) -> Result<ViewController, ViewerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let schema = Schema::build(constants)?;
    debug!(fields = schema.len(), width = schema.record_width(), "Built schema.");

    let records = classify(raw_lines)?;
    let store = RecordStore::new(name, records, schema);
    info!(
        records = store.len() - 1,
        width = store.record_width(),
        "Loaded structure."
    );

    let mut filters = FilterEngine::new();
    for spec in &config.filters {
        filters.register(&spec.name, &spec.field, store.schema())?;
    }

    Ok(ViewController::new(store, filters, config.default_toggles)
        .with_fast_scroll(config.fast_scroll))
}

/// Reads `path` and opens a session titled with the file stem.
#[instrument(skip(constants, config), fields(path = %path.display()))]
pub fn open_path(
    path: &Path,
    constants: &FormatConstants,
    config: &ViewerConfig,
) -> Result<ViewController, ViewerError> {
    let lines = read_lines_from_path(path)?;
    open(&structure_name(path), lines, constants, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::SchemaError;
    use crate::engine::config::{FilterSpec, ViewerConfigBuilder};
    use crate::engine::visibility::KindToggles;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &[&str] = &[
        "HEADER    HYDROLASE                               01-JAN-00   1ABC",
        "ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N",
        "ATOM      2  CA  MET A   1      11.639   6.071  -5.147  1.00  0.00           C",
        "HETATM    3  O   HOH B 101       1.000   2.000   3.000  1.00  0.00           O",
        "END",
    ];

    #[test]
    fn open_registers_the_standard_filters() {
        let controller =
            open("1abc", SAMPLE, &FormatConstants::pdb(), &ViewerConfig::default()).unwrap();
        let filters = controller.filters();
        assert_eq!(filters.len(), 3);
        assert_eq!(filters.by_name("chain").unwrap().reference_values(), ["A", "B"]);
        assert_eq!(filters.by_name("element").unwrap().reference_values(), ["C", "N", "O"]);
        assert_eq!(filters.by_name("residue").unwrap().reference_values(), ["HOH", "MET"]);
        assert_eq!(controller.store().name(), "1abc");
        assert_eq!(controller.toggles(), KindToggles::default());
    }

    #[test]
    fn open_rejects_empty_input() {
        let lines: [&str; 0] = [];
        let result = open("empty", lines, &FormatConstants::pdb(), &ViewerConfig::default());
        assert!(matches!(result, Err(ViewerError::EmptyInput(_))));
    }

    #[test]
    fn open_rejects_filters_on_unknown_fields() {
        let config = ViewerConfigBuilder::new()
            .filter(FilterSpec::new("model", "MODEL_ID"))
            .build()
            .unwrap();
        let result = open("1abc", SAMPLE, &FormatConstants::pdb(), &config);
        assert!(matches!(
            result,
            Err(ViewerError::Configuration(SchemaError::UnknownField(_)))
        ));
    }

    #[test]
    fn open_path_titles_the_session_with_the_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("4hhb.pdb");
        std::fs::write(&path, SAMPLE.join("\n")).unwrap();

        let controller =
            open_path(&path, &FormatConstants::pdb(), &ViewerConfig::default()).unwrap();
        assert_eq!(controller.store().name(), "4hhb");
        assert_eq!(controller.store().len(), SAMPLE.len() + 1);
    }

    #[test]
    fn open_path_reports_missing_files() {
        let result = open_path(
            Path::new("/definitely/not/here.pdb"),
            &FormatConstants::pdb(),
            &ViewerConfig::default(),
        );
        assert!(matches!(result, Err(ViewerError::Load(_))));
    }

    #[test]
    fn open_path_handles_crlf_files() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}\r\n", SAMPLE.join("\r\n")).unwrap();
        let controller =
            open_path(file.path(), &FormatConstants::pdb(), &ViewerConfig::default()).unwrap();
        assert!(controller.store().records().iter().all(|r| !r.text().contains('\r')));
    }
}
