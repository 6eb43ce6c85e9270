//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying the event payload
//! plus `type`, `seq` and `timestamp`. The file is opened in append mode so a
//! restarted server keeps adding to the same transcript.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use toolchat_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use tracing::warn;

/// JSONL conversation logger shared by all concurrent runs.
///
/// Lines from concurrent runs interleave; `seq` gives their total order.
pub struct JsonlConversationLogger {
    writer: Mutex<Sink>,
    path: PathBuf,
}

struct Sink {
    out: BufWriter<File>,
    seq: u64,
}

impl JsonlConversationLogger {
    /// Open (or create) the log file, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(Sink {
                out: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let Ok(mut sink) = self.writer.lock() else {
            return;
        };
        sink.seq += 1;

        let mut record = match event.payload {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), event.event_type.into());
        record.insert("seq".to_string(), sink.seq.into());
        record.insert("timestamp".to_string(), timestamp.into());

        let line = serde_json::Value::Object(record).to_string();
        if let Err(e) = writeln!(sink.out, "{}", line).and_then(|_| sink.out.flush()) {
            warn!("Could not write conversation log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut sink) = self.writer.lock() {
            let _ = sink.out.flush();
        }
    }
}
