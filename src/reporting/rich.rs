use crate::reporting::{Event, Sink};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

// ==============================
// WIDTH HANDLING
// ==============================

fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(visual_width(s))))
}

// ==============================
// BOX RENDERING HELPERS
// ==============================

fn border(left: &str, fill: &str, join: &str, right: &str, widths: &[usize]) -> String {
    let cells: Vec<String> = widths.iter().map(|w| fill.repeat(w + 2)).collect();
    format!("{}{}{}", left, cells.join(join), right)
}

/// Box-drawn table, columns sized by display width (emoji/CJK safe)
pub fn boxed_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| visual_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(visual_width(cell));
            }
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!(" {} ", pad(c, *w)))
            .collect();
        format!("║{}║", padded.join("│"))
    };

    let mut out = vec![
        title.to_string(),
        border("╔", "═", "╤", "╗", &widths),
        line(headers.iter().map(|h| h.to_string()).collect()),
        border("╠", "═", "╪", "╣", &widths),
    ];
    out.extend(rows.iter().map(|r| line(r.clone())));
    out.push(border("╚", "═", "╧", "╝", &widths));
    out
}

/// Colored output with boxed result tables
pub struct RichSink;

impl Sink for RichSink {
    fn render(&self, event: &Event) {
        match event {
            Event::Info { message } => println!("{} {}", "[*]".cyan(), message),
            Event::Warn { message } => println!("{} {}", "[!]".yellow(), message),
            Event::Found { message } => println!("{}", message.green()),
            Event::CharFound {
                position,
                ch,
                so_far,
            } => println!(
                "{}",
                format!("pos {}: Found '{}' => so far: '{}'", position, ch, so_far).green()
            ),
            Event::Count { what, count } => {
                println!("{}", format!("{} count = {}", what, count).green())
            }
            Event::Banner { info, cached } => {
                let tag = if *cached { " (cache)" } else { "" };
                if !info.is_detected() {
                    println!("{} No DBMS banner detected.", "[!]".yellow());
                } else {
                    println!("{}", format!("[BANNER]{} : {}", tag, info.banner).green());
                }
                println!("{}", format!("[DBMS]{} : {}", tag, info.dialect).green().bold());
            }
            Event::Database { name, cached } => {
                let tag = if *cached { " (cache)" } else { "" };
                println!("{}", format!("[DB NAME]{} : {}", tag, name).green().bold());
            }
            Event::Tables { tables } => {
                let rows: Vec<Vec<String>> = tables
                    .iter()
                    .enumerate()
                    .map(|(i, t)| vec![(i + 1).to_string(), t.clone()])
                    .collect();
                for line in boxed_table("Tables", &["Index", "Table"], &rows) {
                    println!("{}", line.magenta());
                }
            }
            Event::Schema { tables } => {
                let rows: Vec<Vec<String>> = tables
                    .iter()
                    .map(|(t, cols)| {
                        let cols = if cols.is_empty() {
                            "No columns found".to_string()
                        } else {
                            cols.join(", ")
                        };
                        vec![t.clone(), cols]
                    })
                    .collect();
                for line in boxed_table("Tables & Columns", &["Table", "Columns"], &rows) {
                    println!("{}", line.magenta());
                }
            }
            Event::Row { index, row } => {
                let cells: Vec<String> = row
                    .values
                    .iter()
                    .map(|(c, v)| format!("{}={}", c, v))
                    .collect();
                println!(
                    "{}",
                    format!("[Row {}] {}", index + 1, cells.join(" | ")).green()
                );
            }
            Event::Menu { options } => {
                println!("\n{}", "Options:".bold());
                for (key, label) in options {
                    println!("  {} - {}", key.cyan(), label);
                }
            }
        }
    }

    fn prompt(&self, label: &str) {
        print!("{}: ", label.bold());
        let _ = std::io::Write::flush(&mut std::io::stdout());
    }
}
