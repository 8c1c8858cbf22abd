//! Renders the engine's event stream to stdout, either as colored lines or
//! as the NDJSON shape the original web frontend consumed.

use buddybot::{LogEvent, Severity};
use colored::Colorize;

pub fn render(event: &LogEvent, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
        return;
    }

    let line = format!("[{}] {}", event.timestamp.format("%H:%M:%S"), event.message);
    match event.severity {
        Severity::Info => println!("{line}"),
        Severity::Success => println!("{}", line.green()),
        Severity::Warning => println!("{}", line.yellow()),
        Severity::Error => println!("{}", line.red()),
    }
}
