use super::record::{EmptyInputError, Record, classify};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),
}

/// Reads every physical line from `reader`, terminators stripped.
pub fn read_lines(reader: &mut impl BufRead) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

pub fn read_lines_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let wrap = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(wrap)?;
    let mut reader = BufReader::new(file);
    read_lines(&mut reader).map_err(wrap)
}

/// Reads and classifies a structure file in one go.
pub fn load_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, LoadError> {
    let lines = read_lines_from_path(path)?;
    Ok(classify(lines)?)
}

/// The display name of a structure file: its stem, or the whole path when it
/// has none.
pub fn structure_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
