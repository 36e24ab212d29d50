use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
    Success,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes `[YYYY-MM-DD HH:MM:SS] [LEVEL] message` lines to the log file and
/// mirrors each one as a tracing event.
#[derive(Debug, Clone)]
pub struct MonitorLog {
    path: PathBuf,
}

impl MonitorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log(&self, level: Level, message: &str) {
        let line = format_line(level, message);

        match level {
            Level::Info | Level::Success => tracing::info!("{line}"),
            Level::Warning => tracing::warn!("{line}"),
            Level::Error => tracing::error!("{line}"),
        }

        if let Err(e) = self.append(&line) {
            tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "failed to append to monitor log"
            );
        }
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn success(&self, message: &str) {
        self.log(Level::Success, message);
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

pub fn format_line(level: Level, message: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{timestamp}] [{level}] {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let line = format_line(Level::Warning, "disk nearly full");
        // [2024-01-02 03:04:05] is 21 characters.
        assert!(line.starts_with('['));
        assert_eq!(&line[20..21], "]");
        assert!(line.ends_with("] [WARNING] disk nearly full"));
    }

    #[test]
    fn test_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = MonitorLog::new(dir.path().join("monitoring.log"));
        log.info("first");
        log.success("second");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] first"));
        assert!(lines[1].ends_with("[SUCCESS] second"));
    }
}
