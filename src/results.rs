use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;

/// Append-only sink for one summary record per completed session
pub trait SummaryLog {
    fn append(&mut self, record: &str) -> Result<()>;
}

/// Keeps records in memory; clones share the same list
#[derive(Debug, Clone, Default)]
pub struct MemorySummaryLog {
    records: Arc<Mutex<Vec<String>>>,
}

impl MemorySummaryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<String> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SummaryLog for MemorySummaryLog {
    fn append(&mut self, record: &str) -> Result<()> {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push(record.to_string());
        Ok(())
    }
}

/// Timestamped lines in a text file, e.g. `results.log`
#[derive(Debug, Clone)]
pub struct FileSummaryLog {
    path: PathBuf,
}

impl FileSummaryLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SummaryLog for FileSummaryLog {
    fn append(&mut self, record: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut log_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        writeln!(
            log_file,
            "[{}] {}",
            Local::now().format("%H:%M:%S-%Y-%m-%d"),
            record
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_log_collects_records() {
        let log = MemorySummaryLog::new();
        let mut sink: Box<dyn SummaryLog> = Box::new(log.clone());

        sink.append("100.0000%   1.0000s   12.0000WPM").unwrap();

        assert_eq!(log.records(), vec!["100.0000%   1.0000s   12.0000WPM".to_string()]);
    }

    #[test]
    fn file_log_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("results.log");
        let mut log = FileSummaryLog::new(&path);

        log.append("first").unwrap();
        log.append("second").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] second"));
    }
}
