use super::schema::SchemaField;
use std::fmt;
use thiserror::Error;

pub const KEYWORD_ATOM: &str = "ATOM";
pub const KEYWORD_HETERO: &str = "HETATM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Meta,
    Atom,
    Hetero,
    Sentinel, // Synthetic end-of-data marker, always the last record
}

impl RecordKind {
    /// Whether schema fields carry meaning for this kind of record.
    pub fn has_fields(self) -> bool {
        matches!(self, RecordKind::Atom | RecordKind::Hetero)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecordKind::Meta => "META",
                RecordKind::Atom => "ATOM",
                RecordKind::Hetero => "HETATM",
                RecordKind::Sentinel => "END",
            }
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("Input contains no lines to display")]
pub struct EmptyInputError;

/// One classified text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    text: String,
    kind: RecordKind,
}

impl Record {
    pub fn new(text: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn sentinel() -> Self {
        Self::new(String::new(), RecordKind::Sentinel)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind == RecordKind::Sentinel
    }

    /// Width of the text in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    /// The trimmed value of `field`, or `None` when the record kind carries no
    /// fields.
    pub fn field_value(&self, field: &SchemaField) -> Option<&str> {
        if !self.kind.has_fields() {
            return None;
        }
        Some(field.extract(&self.text))
    }

    fn pad_to(&mut self, width: usize) {
        let current = self.width();
        if current < width {
            self.text.extend(std::iter::repeat_n(' ', width - current));
        }
    }
}

/// Classifies a single line by its keyword prefix.
pub fn classify_line(line: &str) -> RecordKind {
    if line.starts_with(KEYWORD_ATOM) {
        RecordKind::Atom
    } else if line.starts_with(KEYWORD_HETERO) {
        RecordKind::Hetero
    } else {
        RecordKind::Meta
    }
}

/// Turns raw lines into padded records terminated by a single sentinel.
///
/// Trailing line terminators are stripped before classification. Every record,
/// the sentinel included, is right-padded with spaces to the widest line.
///
/// # Errors
///
/// Returns [`EmptyInputError`] if `raw_lines` yields nothing.
pub fn classify<I, S>(raw_lines: I) -> Result<Vec<Record>, EmptyInputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records: Vec<Record> = raw_lines
        .into_iter()
        .map(|line| {
            let line = line.as_ref();
            let line = line.strip_suffix('\n').unwrap_or(line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            Record::new(line, classify_line(line))
        })
        .collect();
    if records.is_empty() {
        return Err(EmptyInputError);
    }
    records.push(Record::sentinel());
    pad_records(&mut records);
    Ok(records)
}

/// Right-pads every record to the widest one. Applying it twice is a no-op.
pub fn pad_records(records: &mut [Record]) {
    let width = records.iter().map(Record::width).max().unwrap_or(0);
    for record in records.iter_mut() {
        record.pad_to(width);
    }
}
