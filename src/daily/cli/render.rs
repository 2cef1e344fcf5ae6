use chrono::{DateTime, Utc};
use colored::Colorize;
use daily::commands::migrate::MigrationReport;
use daily::config::DailyConfig;
use daily::model::Record;
use std::path::Path;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const DATE_WIDTH: usize = 12;
const TIME_WIDTH: usize = 14;
const TODAY_MARKER: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Success,
    Warning,
}

pub(super) fn print_message(level: MessageLevel, message: &str) {
    match level {
        MessageLevel::Info => println!("{}", message.dimmed()),
        MessageLevel::Success => println!("{}", message.green()),
        MessageLevel::Warning => println!("{}", message.yellow()),
    }
}

pub(super) fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No entries found.");
        return;
    }
    for record in records {
        println!("{}", format_row(record));
    }
}

fn format_row(record: &Record) -> String {
    let marker = if record.is_today() { TODAY_MARKER } else { " " };
    let date = format!("{} {:<width$}", marker, record.entry_date, width = DATE_WIDTH - 2);

    let available = LINE_WIDTH.saturating_sub(DATE_WIDTH + TIME_WIDTH);
    let preview = truncate_to_width(&record.preview(available), available);
    let padding = available.saturating_sub(preview.width());

    format!(
        "{}{}{}{}",
        date.yellow(),
        preview,
        " ".repeat(padding),
        format_time_ago(record.updated_at).dimmed()
    )
}

pub(super) fn print_record(record: &Record) {
    println!(
        "{} {}",
        record.entry_date.to_string().yellow().bold(),
        format!("({} chars)", record.char_count()).dimmed()
    );
    println!("--------------------------------");
    println!("{}", record.content);
    if record.updated_at != record.created_at {
        println!(
            "{}",
            format!("edited {}", format_time_ago(record.updated_at).trim_start()).dimmed()
        );
    }
}

pub(super) fn print_next_cursor(cursor: &str) {
    println!();
    println!("{} daily list --cursor {}", "More:".dimmed(), cursor);
}

pub(super) fn print_migration(report: &MigrationReport) {
    print_message(
        MessageLevel::Success,
        &format!("Copied {} entries.", report.copied),
    );
    for date in &report.skipped {
        print_message(
            MessageLevel::Warning,
            &format!("Skipped {}: the target already has an entry for that date.", date),
        );
    }
}

pub(super) fn print_config(config: &DailyConfig, data_dir: &Path, config_path: Option<&Path>) {
    println!("backend   = {}", config.backend());
    println!("data_dir  = {}", data_dir.display());
    println!("page_size = {}", config.page_size);
    if let Some(path) = config_path {
        println!("{}", format!("(config file: {})", path.display()).dimmed());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
