use crate::reporting::{Event, Sink};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Record<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a Event,
}

pub fn render(event: &Event) -> anyhow::Result<String> {
    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        event,
    };
    Ok(serde_json::to_string(&record)?)
}

/// One JSON object per line on stdout; prompts go to stderr
pub struct JsonSink;

impl Sink for JsonSink {
    fn render(&self, event: &Event) {
        match render(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("failed to serialize event: {}", e),
        }
    }

    fn prompt(&self, label: &str) {
        eprint!("{}: ", label);
        let _ = std::io::stderr().flush();
    }
}
