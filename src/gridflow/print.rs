use chrono::{DateTime, Utc};
use colored::*;
use gridflow::commands::{CmdMessage, MessageLevel, SearchHit};
use gridflow::config::{EditorConfig, CONFIG_KEYS};
use gridflow::model::EditorStats;

const LABEL_WIDTH: usize = 12;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_stats(stats: &EditorStats) {
    let rows = [
        ("Characters", stats.characters.to_string()),
        ("Words", stats.words.to_string()),
        ("Lines", stats.lines.to_string()),
        ("Tags", stats.tags_count.to_string()),
        ("Theme", stats.theme.to_string()),
        ("Created", format_time_ago(stats.created_at)),
        ("Modified", format_time_ago(stats.modified_at)),
        ("Last saved", format_time_ago(stats.last_saved)),
    ];
    for (label, value) in rows {
        println!("{:<width$}{}", format!("{}:", label).bold(), value, width = LABEL_WIDTH);
    }
}

pub fn print_hits(hits: &[SearchHit]) {
    for hit in hits {
        println!(
            "{}  {}",
            format!("{}:{}", hit.line, hit.column).yellow(),
            hit.text
        );
    }
}

pub fn print_config(config: &EditorConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
