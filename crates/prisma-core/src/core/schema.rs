use super::constants::FormatConstants;
use std::collections::BTreeMap;
use thiserror::Error;

const START_SUFFIX: &str = "_START";
const END_SUFFIX: &str = "_END";

/// Widest record a schema may describe.
pub const MAX_RECORD_WIDTH: usize = 4096;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Record width {width} is outside the supported range 1..={max}", max = MAX_RECORD_WIDTH)]
    InvalidWidth { width: usize },

    #[error("Field '{name}' has an empty or inverted range [{start}, {end})")]
    InvertedRange { name: String, start: i64, end: i64 },

    #[error("Field '{name}' has a negative bound ({value})")]
    NegativeBound { name: String, value: i64 },

    #[error("Field '{name}' ends at column {end}, beyond the record width of {width}")]
    OutOfBounds {
        name: String,
        end: usize,
        width: usize,
    },

    #[error("Fields '{first}' and '{second}' overlap")]
    Overlap { first: String, second: String },

    #[error("Unknown schema field '{0}'")]
    UnknownField(String),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// A named half-open character range `[start, end)` within a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaField {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

impl SchemaField {
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, column: usize) -> bool {
        (self.start..self.end).contains(&column)
    }

    /// Renders the column range either as `[SS,EE[` (zero-indexed, half-open)
    /// or as `(SS..EE)` (one-indexed, inclusive), the way the PDB
    /// documentation lists columns.
    pub fn display_range(&self, zero_indexing: bool) -> String {
        if zero_indexing {
            format!("[{:02},{:02}[", self.start, self.end)
        } else {
            format!("({:02}..{:02})", self.start + 1, self.end)
        }
    }

    /// The trimmed content of this field's columns in `text`.
    ///
    /// Columns past the end of `text` read as empty.
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        column_slice(text, self.start, self.end).trim()
    }
}

pub(crate) fn column_slice(text: &str, start: usize, end: usize) -> &str {
    if text.is_ascii() {
        let end = end.min(text.len());
        return text.get(start.min(end)..end).unwrap_or("");
    }
    let byte_offset = |column: usize| {
        text.char_indices()
            .nth(column)
            .map_or(text.len(), |(offset, _)| offset)
    };
    let (start, end) = (byte_offset(start), byte_offset(end));
    text.get(start..end).unwrap_or("")
}

/// The ordered, validated set of fields of one record format, plus a
/// per-column reverse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<SchemaField>,
    column_map: Vec<Option<usize>>,
    record_width: usize,
}

impl Schema {
    /// Pairs `<FIELD>_START` / `<FIELD>_END` constants into fields.
    ///
    /// Names with only one bound are ignored. Fields are sorted by their start
    /// column and receive dense indices in that order.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the record width is zero or above
    /// [`MAX_RECORD_WIDTH`], a range is empty or inverted, a bound is negative
    /// or lies beyond the record width, or two fields overlap.
    pub fn build(constants: &FormatConstants) -> Result<Self, SchemaError> {
        let record_width = constants.record_width();
        if record_width == 0 || record_width > MAX_RECORD_WIDTH {
            return Err(SchemaError::InvalidWidth {
                width: record_width,
            });
        }

        let mut bounds: BTreeMap<&str, (Option<i64>, Option<i64>)> = BTreeMap::new();
        for (key, value) in constants.iter() {
            if let Some(name) = key.strip_suffix(START_SUFFIX) {
                bounds.entry(name).or_default().0 = Some(value);
            } else if let Some(name) = key.strip_suffix(END_SUFFIX) {
                bounds.entry(name).or_default().1 = Some(value);
            }
        }

        let mut fields = Vec::with_capacity(bounds.len());
        for (name, pair) in bounds {
            let (Some(start), Some(end)) = pair else {
                continue;
            };
            fields.push(Self::validate_field(name, start, end, record_width)?);
        }
        fields.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.name.cmp(&b.name)));

        for pair in fields.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(SchemaError::Overlap {
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }

        let mut column_map = vec![None; record_width];
        for (index, field) in fields.iter().enumerate() {
            column_map[field.start..field.end].fill(Some(index));
        }

        Ok(Self {
            fields,
            column_map,
            record_width,
        })
    }

    fn validate_field(
        name: &str,
        start: i64,
        end: i64,
        record_width: usize,
    ) -> Result<SchemaField, SchemaError> {
        for value in [start, end] {
            if value < 0 {
                return Err(SchemaError::NegativeBound {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if end <= start {
            return Err(SchemaError::InvertedRange {
                name: name.to_string(),
                start,
                end,
            });
        }
        let (start, end) = (start as usize, end as usize);
        if end > record_width {
            return Err(SchemaError::OutOfBounds {
                name: name.to_string(),
                end,
                width: record_width,
            });
        }
        Ok(SchemaField {
            name: name.to_string(),
            start,
            end,
        })
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn record_width(&self) -> usize {
        self.record_width
    }

    pub fn field(&self, index: usize) -> Option<&SchemaField> {
        self.fields.get(index)
    }

    pub fn field_by_name(&self, name: &str) -> Option<(usize, &SchemaField)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name == name)
    }

    /// Index of the field covering `column`, or `None` for separator columns
    /// and columns beyond the record width.
    #[inline]
    pub fn field_at(&self, column: usize) -> Option<usize> {
        self.column_map.get(column).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants(width: usize, columns: &[(&str, i64)]) -> FormatConstants {
        FormatConstants::new(width, columns.iter().copied())
    }

    #[test]
    fn build_sorts_fields_by_start_and_assigns_dense_indices() {
        let schema = Schema::build(&constants(
            10,
            &[
                ("B_START", 5),
                ("B_END", 8),
                ("A_START", 0),
                ("A_END", 3),
            ],
        ))
        .unwrap();

        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(schema.field_by_name("B").map(|(i, _)| i), Some(1));
    }

    #[test]
    fn build_maps_columns_and_leaves_separators_unmapped() {
        let schema = Schema::build(&constants(
            10,
            &[
                ("A_START", 0),
                ("A_END", 3),
                ("B_START", 5),
                ("B_END", 8),
            ],
        ))
        .unwrap();

        assert_eq!(schema.field_at(0), Some(0));
        assert_eq!(schema.field_at(2), Some(0));
        assert_eq!(schema.field_at(3), None);
        assert_eq!(schema.field_at(4), None);
        assert_eq!(schema.field_at(5), Some(1));
        assert_eq!(schema.field_at(7), Some(1));
        assert_eq!(schema.field_at(9), None);
        assert_eq!(schema.field_at(500), None);
    }

    #[test]
    fn build_ignores_names_with_a_single_bound() {
        let schema = Schema::build(&constants(
            10,
            &[("A_START", 0), ("A_END", 3), ("LONELY_START", 4)],
        ))
        .unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn build_rejects_inverted_and_empty_ranges() {
        let inverted = Schema::build(&constants(10, &[("A_START", 4), ("A_END", 2)]));
        assert!(matches!(inverted, Err(SchemaError::InvertedRange { .. })));

        let empty = Schema::build(&constants(10, &[("A_START", 4), ("A_END", 4)]));
        assert!(matches!(empty, Err(SchemaError::InvertedRange { .. })));
    }

    #[test]
    fn build_rejects_negative_bounds() {
        let result = Schema::build(&constants(10, &[("A_START", -1), ("A_END", 2)]));
        assert!(matches!(
            result,
            Err(SchemaError::NegativeBound { value: -1, .. })
        ));
    }

    #[test]
    fn build_rejects_fields_beyond_the_record_width() {
        let result = Schema::build(&constants(10, &[("A_START", 8), ("A_END", 11)]));
        assert!(matches!(
            result,
            Err(SchemaError::OutOfBounds { end: 11, width: 10, .. })
        ));
    }

    #[test]
    fn build_rejects_zero_and_oversized_record_widths() {
        let zero = Schema::build(&constants(0, &[]));
        assert!(matches!(zero, Err(SchemaError::InvalidWidth { width: 0 })));

        let huge = FormatConstants::from_toml_str(
            "record-width = 1000000000000000000\n[columns]\nA_START = 0\nA_END = 2\n",
        )
        .unwrap();
        assert!(matches!(
            Schema::build(&huge),
            Err(SchemaError::InvalidWidth {
                width: 1_000_000_000_000_000_000
            })
        ));

        let widest = Schema::build(&constants(MAX_RECORD_WIDTH, &[("A_START", 0), ("A_END", 2)]));
        assert!(widest.is_ok());
    }

    #[test]
    fn build_accepts_a_field_ending_exactly_at_the_width() {
        let schema = Schema::build(&constants(10, &[("A_START", 8), ("A_END", 10)])).unwrap();
        assert_eq!(schema.field_at(9), Some(0));
    }

    #[test]
    fn build_rejects_overlapping_fields() {
        let result = Schema::build(&constants(
            10,
            &[
                ("A_START", 0),
                ("A_END", 4),
                ("B_START", 3),
                ("B_END", 6),
            ],
        ));
        match result {
            Err(SchemaError::Overlap { first, second }) => {
                assert_eq!(first, "A");
                assert_eq!(second, "B");
            }
            other => panic!("expected overlap, got {other:?}"),
        }
    }

    #[test]
    fn pdb_schema_is_valid() {
        let schema = Schema::build(&FormatConstants::pdb()).unwrap();
        assert_eq!(schema.len(), 16);
        assert_eq!(schema.fields()[0].name, "RECORD_NAME");
        let (_, chain) = schema.field_by_name("CHAIN_ID").unwrap();
        assert_eq!((chain.start, chain.end), (21, 22));
        assert_eq!(schema.field_at(20), None);
    }

    #[test]
    fn display_range_uses_both_indexing_conventions() {
        let field = SchemaField {
            name: "SERIAL".into(),
            start: 6,
            end: 11,
        };
        assert_eq!(field.display_range(true), "[06,11[");
        assert_eq!(field.display_range(false), "(07..11)");
    }

    #[test]
    fn extract_trims_and_tolerates_short_text() {
        let field = SchemaField {
            name: "X".into(),
            start: 2,
            end: 6,
        };
        assert_eq!(field.extract("ab cd ef"), "cd");
        assert_eq!(field.extract("abc"), "c");
        assert_eq!(field.extract("a"), "");
    }

    #[test]
    fn extract_counts_characters_not_bytes() {
        let field = SchemaField {
            name: "X".into(),
            start: 1,
            end: 3,
        };
        assert_eq!(field.extract("äbcd"), "bc");
    }
}
