//! CSV ledger implementation
//!
//! The ledger file is a header row followed by one row per accepted record.
//! Rows are only ever appended. Resuming reads the header line and the final
//! line of the file; the rows in between are never decoded.

use crate::ledger::traits::{Ledger, LedgerError, LedgerResult};
use crate::record::AchievementRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Bytes read per step when scanning backwards for the last line
const TAIL_CHUNK: u64 = 4096;

/// Append-only CSV ledger backed by a file on disk
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    /// Creates a ledger handle for `path`
    ///
    /// The parent directory is created when missing. A failure to create it is
    /// logged; the first append will then report the underlying error.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Err(e) = ensure_parent_dir(&path) {
            tracing::warn!(
                "Could not create ledger directory for {}: {}",
                path.display(),
                e
            );
        }
        Self { path }
    }

    /// Creates a ledger handle for `path` without touching the filesystem
    ///
    /// Meant for inspecting an existing ledger.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the resume point, distinguishing "no progress" from failures
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No ledger, an empty ledger, or a header-only ledger
    /// * `Ok(Some(id))` - The `id` of the final row
    /// * `Err(LedgerError)` - The ledger exists but its last row can't be read
    pub fn read_resume_point(&self) -> LedgerResult<Option<u64>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(None);
        }

        let mut header = String::new();
        BufReader::new(&file).read_line(&mut header)?;

        let (offset, last_line) = match last_line(&file, len)? {
            Some(tail) => tail,
            None => return Ok(None),
        };

        // The last non-blank line is the header itself
        if offset == 0 {
            return Ok(None);
        }

        let last_line = String::from_utf8(last_line).map_err(|_| LedgerError::Encoding)?;
        decode_last_id(header.trim_end_matches(['\r', '\n']), &last_line).map(Some)
    }

    /// Reads every row of the ledger
    ///
    /// A missing ledger yields no records.
    pub fn records(&self) -> LedgerResult<Vec<AchievementRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// True when the file is missing or has no bytes yet
    fn needs_header(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true)
    }
}

impl Ledger for CsvLedger {
    fn resume_point(&self) -> u64 {
        match self.read_resume_point() {
            Ok(Some(id)) => {
                tracing::info!("Ledger {} ends at ID {}", self.path.display(), id);
                id
            }
            Ok(None) => {
                tracing::info!("No prior progress in {}", self.path.display());
                0
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read resume point from {}: {}; starting over",
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    fn append(&mut self, records: &[AchievementRecord]) -> LedgerResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let needs_header = self.needs_header();
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // A previous write that stopped mid-row must not swallow our first row
        if !needs_header && !ends_with_newline(&mut file)? {
            tracing::warn!(
                "Ledger {} ends with an unterminated row",
                self.path.display()
            );
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::debug!(
            "Appended {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(records.len())
    }
}

/// True when the file's last byte is a newline, or the file is empty
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Creates the parent directory of `path` if it has one and it is missing
fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Finds the last non-blank line by reading backwards from the end
///
/// Returns the byte offset where that line starts together with its bytes
/// (trailing whitespace removed), or `None` if the file is entirely blank.
fn last_line(mut file: &File, len: u64) -> io::Result<Option<(u64, Vec<u8>)>> {
    let mut tail: Vec<u8> = Vec::new();
    let mut pos = len;

    loop {
        let start = pos.saturating_sub(TAIL_CHUNK);
        let mut chunk = vec![0u8; (pos - start) as usize];
        file.seek(SeekFrom::Start(start))?;
        file.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&tail);
        tail = chunk;
        pos = start;

        let content_end = tail
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map(|i| i + 1);

        if let Some(end) = content_end {
            if let Some(newline) = tail[..end].iter().rposition(|&b| b == b'\n') {
                let line = tail[newline + 1..end].to_vec();
                return Ok(Some((pos + newline as u64 + 1, line)));
            }
        }

        if pos == 0 {
            return Ok(content_end.map(|end| (0, tail[..end].to_vec())));
        }
    }
}

/// Decodes the `id` column of `last` using the column names of `header`
fn decode_last_id(header: &str, last: &str) -> LedgerResult<u64> {
    let text = format!("{}\n{}\n", header, last);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let index = reader
        .headers()?
        .iter()
        .position(|column| column == "id")
        .ok_or(LedgerError::MissingColumn("id"))?;

    let row = reader
        .records()
        .next()
        .transpose()?
        .ok_or(LedgerError::ShortRow(index))?;

    let value = row.get(index).ok_or(LedgerError::ShortRow(index))?;
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| LedgerError::InvalidId(value.to_string()))
}
