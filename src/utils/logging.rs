//! Transcript logging: appends each settled exchange to a plain-text file.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

use crate::core::message::Message;

pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new() -> Self {
        LoggingState {
            file_path: None,
            is_active: false,
        }
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        // Test if we can create/write to the file
        self.test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;

        Ok(format!("Logging enabled to: {path}"))
    }

    /// Appends one transcript entry. User entries get a "You: " prefix so the
    /// log reads like the screen does; assistant entries are written as-is.
    pub fn log_entry(&self, entry: &Message) -> Result<(), Box<dyn std::error::Error>> {
        if entry.is_user {
            self.log_message(&format!("You: {}", entry.text))
        } else {
            self.log_message(&entry.text)
        }
    }

    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active {
            return Ok(());
        }
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        // Write each line of content, preserving the exact formatting
        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Add an empty line after each message for spacing (matching screen display)
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        // Try to create/open the file to ensure we have write permissions
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

impl Default for LoggingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn inactive_logger_writes_nothing() {
        let logging = LoggingState::new();
        // No file configured, so this must be a quiet no-op.
        logging.log_message("dropped").unwrap();
    }

    #[test]
    fn entries_are_appended_with_user_prefix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.log");

        let mut logging = LoggingState::new();
        let status = logging.set_log_file(path.to_string_lossy().to_string()).unwrap();
        assert!(status.starts_with("Logging enabled to: "));

        logging.log_entry(&Message::user("hello")).unwrap();
        logging
            .log_entry(&Message::assistant("line one\nline two"))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "You: hello\n\nline one\nline two\n\n");
    }

    #[test]
    fn unwritable_path_is_rejected_up_front() {
        let mut logging = LoggingState::new();
        let result = logging.set_log_file("/nonexistent-dir/chat.log".to_string());
        assert!(result.is_err());
        // The rejected path must not become the log target.
        logging.log_entry(&Message::user("dropped")).unwrap();
    }
}
