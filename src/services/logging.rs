use dioxus::prelude::{Signal, WritableExt};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::services::bridge::OutputStream;

const MAX_ENTRIES: usize = 200;
const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<OutputStream> for LogLevel {
    fn from(stream: OutputStream) -> Self {
        match stream {
            OutputStream::Stdout => LogLevel::Info,
            OutputStream::Stderr => LogLevel::Error,
        }
    }
}

/// Who produced a feed line: the page itself or the simulator's stdio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogSource {
    #[default]
    Host,
    Module(OutputStream),
}

impl LogSource {
    pub fn tag(self) -> Option<&'static str> {
        match self {
            LogSource::Host => None,
            LogSource::Module(OutputStream::Stdout) => Some("stdout"),
            LogSource::Module(OutputStream::Stderr) => Some("stderr"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub source: LogSource,
    pub message: String,
    pub timestamp: OffsetDateTime,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: LogSource::Host,
            message: message.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// A line the simulator printed; stderr lines are shown as errors.
    pub fn module_output(stream: OutputStream, line: &str) -> Self {
        Self {
            source: LogSource::Module(stream),
            ..Self::new(LogLevel::from(stream), line.trim_end())
        }
    }

    pub fn is_module_output(&self) -> bool {
        matches!(self.source, LogSource::Module(_))
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format(TIME_FORMAT).unwrap_or_default()
    }
}

/// Appends to a bounded feed, dropping the oldest entries first.
pub fn append_entry(entries: &mut Vec<LogEntry>, entry: LogEntry) {
    entries.push(entry);
    if entries.len() > MAX_ENTRIES {
        let drop = entries.len() - MAX_ENTRIES;
        entries.drain(0..drop);
    }
}

pub fn push_log(mut logs: Signal<Vec<LogEntry>>, level: LogLevel, message: impl Into<String>) {
    append_entry(&mut logs.write(), LogEntry::new(level, message));
}

pub fn push_module_output(mut logs: Signal<Vec<LogEntry>>, stream: OutputStream, line: &str) {
    append_entry(&mut logs.write(), LogEntry::module_output(stream, line));
}
