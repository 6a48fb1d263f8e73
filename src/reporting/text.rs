use crate::reporting::{Event, Sink};

/// Plain `[*]` / `[!]` console output
pub struct PlainSink;

impl PlainSink {
    pub fn format(event: &Event) -> Vec<String> {
        match event {
            Event::Info { message } => vec![format!("[*] {}", message)],
            Event::Warn { message } => vec![format!("[!] {}", message)],
            Event::Found { message } => vec![message.clone()],
            Event::CharFound {
                position,
                ch,
                so_far,
            } => vec![format!(
                "pos {}: Found '{}' => so far: '{}'",
                position, ch, so_far
            )],
            Event::Count { what, count } => vec![format!("{} count = {}", what, count)],
            Event::Banner { info, cached } => {
                let tag = if *cached { " (cache)" } else { "" };
                let mut lines = Vec::new();
                if !info.is_detected() {
                    lines.push("[!] No DBMS banner detected.".to_string());
                } else {
                    lines.push(format!("[BANNER]{} : {}", tag, info.banner));
                }
                lines.push(format!("[DBMS]{} : {}", tag, info.dialect));
                lines
            }
            Event::Database { name, cached } => {
                let tag = if *cached { " (cache)" } else { "" };
                vec![format!("[DB NAME]{} : {}", tag, name)]
            }
            Event::Tables { tables } => {
                let mut lines = vec!["[*] Available tables:".to_string()];
                lines.extend(
                    tables
                        .iter()
                        .enumerate()
                        .map(|(i, t)| format!("  {}. {}", i + 1, t)),
                );
                lines
            }
            Event::Schema { tables } => {
                let mut lines = vec!["[*] Tables & columns:".to_string()];
                for (table, columns) in tables {
                    if columns.is_empty() {
                        lines.push(format!("{} => No columns found", table));
                    } else {
                        lines.push(format!("{} => [{}]", table, columns.join(", ")));
                    }
                }
                lines
            }
            Event::Row { index, row } => {
                let values: Vec<String> = row
                    .values
                    .iter()
                    .map(|(c, v)| format!("'{}': '{}'", c, v))
                    .collect();
                vec![format!("[Row {}] => {{{}}}", index + 1, values.join(", "))]
            }
            Event::Menu { options } => {
                let mut lines = vec![String::new(), "Options:".to_string()];
                lines.extend(options.iter().map(|(k, label)| format!("  {} - {}", k, label)));
                lines
            }
        }
    }
}

impl Sink for PlainSink {
    fn render(&self, event: &Event) {
        for line in Self::format(event) {
            println!("{}", line);
        }
    }
}
