//! Output sinks
//!
//! The engine reports progress and results as [`Event`]s; the active [`Sink`]
//! decides how they look. Extraction code only ever sees `&dyn Sink`.

pub mod json;
pub mod rich;
pub mod text;

use crate::cli::args::OutputFormat;
use crate::sqli::dialect::DialectInfo;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

/// One dumped row, in column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub values: Vec<(String, String)>,
}

#[cfg(test)]
impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(c, _)| c.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Info {
        message: String,
    },
    Warn {
        message: String,
    },
    Found {
        message: String,
    },
    CharFound {
        position: usize,
        ch: char,
        so_far: String,
    },
    Count {
        what: String,
        count: usize,
    },
    Banner {
        info: DialectInfo,
        cached: bool,
    },
    Database {
        name: String,
        cached: bool,
    },
    Tables {
        tables: Vec<String>,
    },
    Schema {
        tables: Vec<(String, Vec<String>)>,
    },
    Row {
        index: usize,
        row: Row,
    },
    Menu {
        options: Vec<(String, String)>,
    },
}

impl Event {
    pub fn info(message: impl Into<String>) -> Self {
        Event::Info {
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Event::Warn {
            message: message.into(),
        }
    }

    pub fn found(message: impl Into<String>) -> Self {
        Event::Found {
            message: message.into(),
        }
    }
}

pub trait Sink: Send + Sync {
    fn render(&self, event: &Event);

    /// Shows an input prompt; the answer is read by the caller.
    fn prompt(&self, label: &str) {
        print!("{}: ", label);
        let _ = std::io::stdout().flush();
    }
}

pub fn sink_for(format: OutputFormat) -> Arc<dyn Sink> {
    match format {
        OutputFormat::Plain => Arc::new(text::PlainSink),
        OutputFormat::Rich => Arc::new(rich::RichSink),
        OutputFormat::Json => Arc::new(json::JsonSink),
    }
}

/// Discards output, keeps a copy of every event
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<Event>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Warn { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Sink for MemorySink {
    fn render(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn prompt(&self, _label: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lookup() {
        let row = Row {
            values: vec![
                ("id".to_string(), "1".to_string()),
                ("name".to_string(), "alice".to_string()),
            ],
        };
        assert_eq!(row.get("name"), Some("alice"));
        assert_eq!(row.get("email"), None);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name"]);
    }
}
