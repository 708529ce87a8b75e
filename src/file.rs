// src/file.rs

use std::{
    collections::HashSet,
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::{ExportFormat, ExportOptions};
use crate::csv::write_row;
use crate::data::NormalizedRecord;
use crate::error::Error;

/// Appends normalized records to per-letter / per-word (or a single) output file.
///
/// The first write to a destination during a run creates or truncates it
/// (and writes the header row, if asked); later writes append. Nothing is
/// remembered across runs.
pub struct OutputWriter {
    export: ExportOptions,
    started: HashSet<PathBuf>,
    written: Vec<PathBuf>,
}

impl OutputWriter {
    pub fn new(export: ExportOptions) -> Self {
        Self { export, started: HashSet::new(), written: Vec::new() }
    }

    /// Destinations touched so far, in first-write order.
    pub fn files(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn write(&mut self, record: &NormalizedRecord, group: &str) -> Result<PathBuf, Error> {
        self.write_all(std::slice::from_ref(record), group)
    }

    /// Write a page's worth of records for `group`. Returns the file written to.
    pub fn write_all(&mut self, records: &[NormalizedRecord], group: &str) -> Result<PathBuf, Error> {
        let path = self.export.out_path(group);

        if !self.started.contains(&path) {
            self.start(&path)?;
            self.started.insert(path.clone());
            self.written.push(path.clone());
        }

        append_records(&path, records, self.export.format).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    fn start(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        let headers = match (self.export.include_headers, self.export.format.delim()) {
            (true, Some(sep)) => Some((NormalizedRecord::HEADERS, sep)),
            _ => None,
        };
        write_rows_start(path, headers).map_err(|e| Error::io(path, e))
    }
}

/// Create/truncate file; optionally write header.
fn write_rows_start(path: &Path, headers: Option<(&[&str], char)>) -> std::io::Result<()> {
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    if let Some((h, sep)) = headers {
        write_row(&mut out, h, sep)?;
    }
    out.flush()
}

/// Append records to an existing file (must be created already).
fn append_records(path: &Path, records: &[NormalizedRecord], format: ExportFormat) -> std::io::Result<()> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut out = BufWriter::new(file);
    for record in records {
        match format.delim() {
            Some(sep) => write_row(&mut out, &record.to_row(), sep)?,
            None => {
                serde_json::to_writer(&mut out, record)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()
}

pub fn ensure_directory(dir: &Path) -> Result<(), Error> {
    if dir.exists() && !dir.is_dir() {
        let source = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory");
        return Err(Error::io(dir, source));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportType;
    use crate::csv::parse_rows;

    fn record(hw: &str, def: &str) -> NormalizedRecord {
        NormalizedRecord {
            headword: s!(hw),
            variant_forms: vec![],
            parts_of_speech: vec![s!("n.")],
            definition: s!(def),
        }
    }

    fn export_in(dir: &Path) -> ExportOptions {
        ExportOptions { out_dir: dir.to_path_buf(), ..ExportOptions::default() }
    }

    #[test]
    fn first_write_truncates_then_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "stale from last run\n").unwrap();

        let mut w = OutputWriter::new(export_in(dir.path()));
        w.write(&record("aba", "alas"), "a").unwrap();
        w.write(&record("abo", "ash"), "a").unwrap();

        let rows = parse_rows(&fs::read_to_string(&path).unwrap(), ',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "aba");
        assert_eq!(rows[1][3], "ash");
        assert_eq!(w.files(), &[path]);
    }

    #[test]
    fn headers_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut export = export_in(dir.path());
        export.include_headers = true;
        export.format = ExportFormat::Tsv;

        let mut w = OutputWriter::new(export);
        w.write_all(&[record("aba", "alas"), record("abo", "ash")], "a").unwrap();
        w.write_all(&[record("aso", "dog")], "a").unwrap();

        let text = fs::read_to_string(dir.path().join("a.tsv")).unwrap();
        let rows = parse_rows(&text, '\t');
        assert_eq!(rows[0], NormalizedRecord::HEADERS);
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn single_file_collects_all_groups() {
        let dir = tempfile::tempdir().unwrap();
        let mut export = export_in(dir.path());
        export.export_type = ExportType::SingleFile;

        let mut w = OutputWriter::new(export);
        let a = w.write(&record("aba", "alas"), "a").unwrap();
        let b = w.write(&record("baba", "chin"), "b").unwrap();
        assert_eq!(a, b);
        assert_eq!(w.files().len(), 1);
        assert_eq!(parse_rows(&fs::read_to_string(a).unwrap(), ',').len(), 2);
    }

    #[test]
    fn json_lines_keep_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut export = export_in(dir.path());
        export.format = ExportFormat::Json;

        let mut w = OutputWriter::new(export);
        let path = w.write(&record("yakap", "embrace"), "yakap").unwrap();
        let line = fs::read_to_string(path).unwrap();
        assert_eq!(
            line,
            "{\"headword\":\"yakap\",\"variant_forms\":[],\"parts_of_speech\":[\"n.\"],\"definition\":\"embrace\"}\n"
        );
    }

    #[test]
    fn out_dir_blocked_by_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "").unwrap();

        let mut w = OutputWriter::new(export_in(&blocker));
        let err = w.write(&record("a", "b"), "a").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(w.files().is_empty());
    }
}
