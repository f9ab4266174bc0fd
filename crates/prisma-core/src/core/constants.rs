use super::schema::SchemaError;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Width of an ATOM/HETATM record in the PDB format.
pub const PDB_RECORD_WIDTH: usize = 80;

#[rustfmt::skip]
static PDB_COLUMNS: Map<&'static str, i64> = phf_map! {
    "RECORD_NAME_START" => 0,  "RECORD_NAME_END" => 6,
    "SERIAL_START"      => 6,  "SERIAL_END"      => 11,
    "ATOM_NAME_START"   => 12, "ATOM_NAME_END"   => 16,
    "ALT_LOC_START"     => 16, "ALT_LOC_END"     => 17,
    "RES_NAME_START"    => 17, "RES_NAME_END"    => 20,
    "CHAIN_ID_START"    => 21, "CHAIN_ID_END"    => 22,
    "RES_SEQ_START"     => 22, "RES_SEQ_END"     => 26,
    "I_CODE_START"      => 26, "I_CODE_END"      => 27,
    "X_START"           => 30, "X_END"           => 38,
    "Y_START"           => 38, "Y_END"           => 46,
    "Z_START"           => 46, "Z_END"           => 54,
    "OCCUPANCY_START"   => 54, "OCCUPANCY_END"   => 60,
    "TEMP_FACTOR_START" => 60, "TEMP_FACTOR_END" => 66,
    "SEGMENT_ID_START"  => 72, "SEGMENT_ID_END"  => 76,
    "ELEMENT_START"     => 76, "ELEMENT_END"     => 78,
    "CHARGE_START"      => 78, "CHARGE_END"      => 80,
};

/// A table of `<FIELD>_START` / `<FIELD>_END` column offsets together with the
/// record width they apply to.
///
/// Keys are kept as written; pairing them into fields and validating the
/// resulting ranges is the job of [`Schema::build`](super::schema::Schema::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConstants {
    record_width: usize,
    columns: BTreeMap<String, i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ConstantsFile {
    record_width: usize,
    #[serde(default)]
    columns: BTreeMap<String, i64>,
}

impl FormatConstants {
    pub fn new<K, I>(record_width: usize, columns: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, i64)>,
    {
        Self {
            record_width,
            columns: columns.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The built-in layout of PDB ATOM/HETATM records.
    pub fn pdb() -> Self {
        Self::new(
            PDB_RECORD_WIDTH,
            PDB_COLUMNS.entries().map(|(k, v)| (*k, *v)),
        )
    }

    /// Loads a constants table from a TOML file of the form
    ///
    /// ```toml
    /// record-width = 80
    /// [columns]
    /// CHAIN_ID_START = 21
    /// CHAIN_ID_END = 22
    /// ```
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| SchemaError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConstantsFile = toml::from_str(content)?;
        Ok(Self {
            record_width: file.record_width,
            columns: file.columns,
        })
    }

    pub fn record_width(&self) -> usize {
        self.record_width
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.columns.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for FormatConstants {
    fn default() -> Self {
        Self::pdb()
    }
}
