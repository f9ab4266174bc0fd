use crate::cli::ValuesArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use molprisma::engine::store::RecordStore;
use molprisma::workflows::session;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: ValuesArgs, config: AppConfig) -> Result<()> {
    info!("Loading input structure from {:?}", &args.input);
    let controller = session::open_path(&args.input, &config.constants, &config.viewer)?;
    write_values(controller.store(), &args.field, &mut io::stdout().lock())
}

/// Writes the distinct values of `field`, one per line.
pub fn write_values(store: &RecordStore, field: &str, out: &mut impl Write) -> Result<()> {
    if store.schema().field_by_name(field).is_none() {
        let known: Vec<_> = store.schema().fields().iter().map(|f| f.name.as_str()).collect();
        return Err(CliError::Argument(format!(
            "Unknown field '{}'. Known fields: {}",
            field,
            known.join(", ")
        )));
    }
    for value in store.unique_values(field) {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use molprisma::core::constants::FormatConstants;
    use molprisma::engine::config::ViewerConfig;
    use molprisma::workflows::session;

    const SAMPLE: &[&str] = &[
        "ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N",
        "ATOM      2  N   GLY B   2      11.104   6.134  -6.504  1.00  0.00           N",
        "HETATM    3  O   HOH A 101       1.000   2.000   3.000  1.00  0.00           O",
    ];

    fn store_output(field: &str) -> Result<String> {
        let controller =
            session::open("t", SAMPLE, &FormatConstants::pdb(), &ViewerConfig::default())?;
        let mut out = Vec::new();
        write_values(controller.store(), field, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_sorted_distinct_values() {
        assert_eq!(store_output("RES_NAME").unwrap(), "GLY\nHOH\nMET\n");
        assert_eq!(store_output("CHAIN_ID").unwrap(), "A\nB\n");
    }

    #[test]
    fn unknown_fields_list_the_known_ones() {
        match store_output("MODEL") {
            Err(CliError::Argument(msg)) => assert!(msg.contains("CHAIN_ID")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
