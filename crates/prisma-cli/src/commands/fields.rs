use crate::cli::FieldsArgs;
use crate::config::AppConfig;
use crate::error::Result;
use molprisma::core::schema::Schema;
use molprisma::engine::store::RecordStore;
use molprisma::workflows::session;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: FieldsArgs, config: AppConfig) -> Result<()> {
    let mut out = io::stdout().lock();
    match args.input {
        Some(path) => {
            info!("Loading input structure from {:?}", &path);
            let controller = session::open_path(&path, &config.constants, &config.viewer)?;
            write_fields(controller.store().schema(), Some(controller.store()), &mut out)
        }
        None => write_fields(&Schema::build(&config.constants)?, None, &mut out),
    }
}

/// Writes the field table; with a store, adds each field's distinct value count.
pub fn write_fields(
    schema: &Schema,
    store: Option<&RecordStore>,
    out: &mut impl Write,
) -> Result<()> {
    match store {
        Some(_) => writeln!(out, "0-index | 1-index  | Name         | Values")?,
        None => writeln!(out, "0-index | 1-index  | Name")?,
    }
    for field in schema.fields() {
        let ranges = format!(
            "{} | {} | {}",
            field.display_range(true),
            field.display_range(false),
            field.name
        );
        match store {
            Some(store) => writeln!(
                out,
                "{ranges:<32} | {}",
                store.unique_values(&field.name).len()
            )?,
            None => writeln!(out, "{ranges}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use molprisma::core::constants::FormatConstants;
    use molprisma::engine::config::ViewerConfig;

    fn render(schema: &Schema, store: Option<&RecordStore>) -> String {
        let mut out = Vec::new();
        write_fields(schema, store, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_every_pdb_field_in_column_order() {
        let schema = Schema::build(&FormatConstants::pdb()).unwrap();
        let text = render(&schema, None);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[1], "[00,06[ | (01..06) | RECORD_NAME");
        assert_eq!(lines[16], "[78,80[ | (79..80) | CHARGE");
    }

    #[test]
    fn counts_values_when_a_structure_is_given() {
        let controller = session::open(
            "t",
            ["ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N"],
            &FormatConstants::pdb(),
            &ViewerConfig::default(),
        )
        .unwrap();
        let text = render(controller.store().schema(), Some(controller.store()));
        let chain = text.lines().find(|l| l.contains("CHAIN_ID")).unwrap();
        assert!(chain.ends_with("| 1"));
        let charge = text.lines().find(|l| l.contains("CHARGE")).unwrap();
        assert!(charge.ends_with("| 0"));
    }
}
