//! JSONL file writer for workflow events.
//!
//! Each [`ConversationEvent`] becomes one JSON object per line carrying a
//! `type`, an RFC-3339 `timestamp` and the run's `session` id. The file is
//! opened in append mode so several runs can share one log.

use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use triad_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    session: String,
}

impl JsonlConversationLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; the caller then runs
    /// without a conversation log.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            session: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    /// Tag every record with `session` instead of the start time.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("session".to_string(), Value::String(self.session.clone()));
        // Turn events carry the turn's own timestamp
        map.entry("timestamp").or_insert_with(|| {
            Value::String(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        });
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap().with_session("run-1");

        logger.log(ConversationEvent::new(
            "dispatch",
            json!({ "role": "builder", "task": "test_code", "phase": "testing" }),
        ));
        logger.log(ConversationEvent::new(
            "transition",
            json!({ "from": "development", "to": "testing", "iteration": 1 }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["session"], "run-1");
            assert!(line["timestamp"].is_string());
        }
        assert_eq!(lines[0]["type"], "dispatch");
        assert_eq!(lines[0]["role"], "builder");
        assert_eq!(lines[1]["type"], "transition");
        assert_eq!(lines[1]["iteration"], 1);
    }

    #[test]
    fn test_turn_timestamp_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "turn",
            json!({
                "author": "Test Engineer",
                "content": "I agree",
                "timestamp": "2024-05-01T10:00:00+00:00",
            }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["timestamp"], "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "rejected_after_finish",
            json!("one more thing"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "rejected_after_finish");
        assert_eq!(lines[0]["data"], "one more thing");
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shared.jsonl");

        for session in ["a", "b"] {
            let logger = JsonlConversationLogger::new(&path)
                .unwrap()
                .with_session(session);
            logger.log(ConversationEvent::new("finalized", json!({ "forced": false })));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["session"], "a");
        assert_eq!(lines[1]["session"], "b");
    }

    #[test]
    fn test_unopenable_path_gives_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file
        assert!(JsonlConversationLogger::new(dir.path()).is_none());
    }
}
