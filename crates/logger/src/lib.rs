use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::{OffsetDateTime, Time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Fatal,
    Error,
    Warning,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    pub fn parse(value: &str) -> Option<LogLevel> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FATAL" => Some(LogLevel::Fatal),
            "ERROR" => Some(LogLevel::Error),
            "WARNING" => Some(LogLevel::Warning),
            "INFO" => Some(LogLevel::Info),
            "DEBUG" => Some(LogLevel::Debug),
            "TRACE" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: Time,
    pub level: LogLevel,
    /// Text printed in the level column. Matches `level` unless the caller passed a name
    /// that is not a known level; that name is kept and styled as INFO.
    pub label: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: Time, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            label: level.as_str().to_string(),
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{} - {:>8} - {}",
            format_time_of_day(self.timestamp),
            single_line(&self.label),
            single_line(&self.message)
        )
    }
}

/// One log call is one file line, so embedded line breaks become spaces.
fn single_line(text: &str) -> String {
    text.split(|c| c == '\r' || c == '\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_time_of_day(timestamp: Time) -> String {
    timestamp
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "00:00:00".to_string())
}

fn now_time_of_day() -> Time {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .time()
}

#[derive(Debug, Clone)]
pub struct Logger {
    path: PathBuf,
    console: bool,
}

impl Logger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            console: true,
        }
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) -> Result<()> {
        self.emit(&LogEntry::new(now_time_of_day(), level, message.as_ref()))
    }

    /// Level given as free text. Missing or unknown names fall back to INFO styling.
    pub fn log_str(&self, level: Option<&str>, message: impl AsRef<str>) -> Result<()> {
        let entry = match level {
            None => LogEntry::new(now_time_of_day(), LogLevel::Info, message.as_ref()),
            Some(name) => match LogLevel::parse(name) {
                Some(level) => LogEntry::new(now_time_of_day(), level, message.as_ref()),
                None => LogEntry {
                    timestamp: now_time_of_day(),
                    level: LogLevel::Info,
                    label: name.trim().to_string(),
                    message: message.as_ref().to_string(),
                },
            },
        };
        self.emit(&entry)
    }

    pub fn fatal(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Fatal, message)
    }

    pub fn error(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    pub fn warning(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    pub fn info(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn debug(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    pub fn trace(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Trace, message)
    }

    pub fn emit(&self, entry: &LogEntry) -> Result<()> {
        let line = entry.render();
        if self.console {
            println!("{}", styled(entry.level, &line));
        }
        self.append(&line)
    }

    fn append(&self, line: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create log directory {}", parent.display()))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open log file {}", self.path.display()))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("append to log file {}", self.path.display()))?;
        Ok(())
    }
}

fn styled(level: LogLevel, line: &str) -> String {
    match level {
        LogLevel::Fatal | LogLevel::Error => line.red().reversed().to_string(),
        LogLevel::Warning => line.yellow().to_string(),
        LogLevel::Debug | LogLevel::Trace => line.dimmed().to_string(),
        LogLevel::Info => line.to_string(),
    }
}
