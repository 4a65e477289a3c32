use chrono::Local;
use colored::Colorize;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Appends a timestamped entry to `<dir>/<filename>`.
///
/// # Arguments
///
/// * `dir` - Log directory, created if it doesn't exist
/// * `filename` - The name of the log file
/// * `message` - The message to log
pub fn log_to_file(dir: &Path, filename: &str, message: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(filename))?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    writeln!(file, "\n--- Log entry at {} ---", timestamp)?;
    writeln!(file, "{}", message)?;
    writeln!(file, "--- End of entry ---")?;
    file.flush()
}

/// Logs a message with a banner header.
pub fn log_with_header(dir: &Path, filename: &str, header: &str, message: &str) -> io::Result<()> {
    let formatted_message = format!(
        "===== {} =====\n{}\n====================",
        header, message
    );
    log_to_file(dir, filename, &formatted_message)
}

/// One row of the run history CSV.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunRecord {
    pub timestamp: String,
    pub script: String,
    pub outcome: String,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub figures: usize,
}

/// Appends a record to the run history, writing headers only if the file is new.
pub fn append_run_history(dir: &Path, filename: &str, record: &RunRecord) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create log directory {}: {}", dir.display(), e))?;
    let path = dir.join(filename);
    let file_exists = path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open run history {}: {}", path.display(), e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    writer
        .serialize(record)
        .map_err(|e| format!("Failed to write run history: {}", e))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to flush run history: {}", e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Ok,
    Warn,
    Error,
}

/// Console status line with a colored level tag.
pub fn print_status(status: Status, message: &str) {
    match status {
        Status::Info => println!("{} {}", "[info]".cyan(), message),
        Status::Ok => println!("{} {}", "[ ok ]".green(), message),
        Status::Warn => eprintln!("{} {}", "[warn]".yellow(), message),
        Status::Error => eprintln!("{} {}", "[fail]".red().bold(), message),
    }
}
