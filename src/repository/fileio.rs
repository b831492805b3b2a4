use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed text file: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed binary file: {0}")]
    Decode(#[from] bitcode::Error),
}

/// Where a repository keeps its records between runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Nothing is persisted
    Memory,
    /// Comma separated text, one entity per line
    Text(PathBuf),
    /// bitcode-encoded list of records
    Binary(PathBuf),
}

impl Storage {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Storage::Memory => None,
            Storage::Text(path) | Storage::Binary(path) => Some(path),
        }
    }

    /// Read every stored record. A missing file counts as empty.
    pub fn load(&self) -> Result<Vec<Vec<String>>, StorageError> {
        match self {
            Storage::Memory => Ok(Vec::new()),
            Storage::Text(path) if path.exists() => read_text(path),
            Storage::Binary(path) if path.exists() => read_binary(path),
            _ => Ok(Vec::new()),
        }
    }

    /// Replace the stored records with `records`
    pub fn save(&self, records: &[Vec<String>]) -> Result<(), StorageError> {
        match self {
            Storage::Memory => Ok(()),
            Storage::Text(path) => write_text(path, records),
            Storage::Binary(path) => write_binary(path, records),
        }
    }
}

// === Text ===

fn read_text(path: &Path) -> Result<Vec<Vec<String>>, StorageError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(records)
}

fn write_text(path: &Path, records: &[Vec<String>]) -> Result<(), StorageError> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

// === Binary ===

fn read_binary(path: &Path) -> Result<Vec<Vec<String>>, StorageError> {
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    Ok(bitcode::decode(&bytes)?)
}

/// Write to `{path}.tmp`, sync, then rename over the real file so a
/// crash mid-write leaves the previous contents intact.
fn write_binary(path: &Path, records: &[Vec<String>]) -> Result<(), StorageError> {
    let bytes = bitcode::encode(records);

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let mut file = File::create(&tmp_path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
