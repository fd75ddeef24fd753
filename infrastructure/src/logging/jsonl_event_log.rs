//! JSONL file writer for game events.
//!
//! Each [`GameEvent`] is serialized as a single JSON line carrying its `type`
//! tag plus `seq` and `timestamp`, appended to the file and flushed per line.

use imposter_application::EventSink;
use imposter_domain::GameEvent;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum EventLogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}:{line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}

struct LogState {
    writer: BufWriter<File>,
    seq: u64,
}

/// Append-only JSONL event log.
///
/// Thread-safe via `Mutex`. Write failures are logged and swallowed so a
/// full disk never aborts a running game.
pub struct JsonlEventLog {
    state: Mutex<LogState>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Create (truncate) the log file, creating parent directories as needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, EventLogError> {
        let path = path.as_ref();
        let io_err = |source| EventLogError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(path).map_err(io_err)?;

        Ok(Self {
            state: Mutex::new(LogState {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &GameEvent, seq: u64) -> Option<serde_json::Value> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        match serde_json::to_value(event) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.insert("seq".to_string(), seq.into());
                map.insert("timestamp".to_string(), timestamp.into());
                Some(serde_json::Value::Object(map))
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Could not serialize {} event: {}", event.event_type(), e);
                None
            }
        }
    }
}

impl EventSink for JsonlEventLog {
    fn emit(&self, event: &GameEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.seq += 1;
        let Some(record) = Self::record(event, state.seq) else {
            return;
        };

        let written = writeln!(state.writer, "{}", record).and_then(|_| state.writer.flush());
        if let Err(e) = written {
            warn!("Could not write event log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlEventLog {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.writer.flush();
        }
    }
}

/// Load every event of a JSONL log, in file order. Blank lines are skipped.
pub fn read_event_log(path: impl AsRef<Path>) -> Result<Vec<GameEvent>, EventLogError> {
    let path = path.as_ref();
    let io_err = |source| EventLogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|source| EventLogError::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imposter_domain::{GameReplay, PlayerId};

    fn sample_events() -> Vec<GameEvent> {
        vec![
            GameEvent::RoundStart {
                round: 1,
                total_rounds: 2,
            },
            GameEvent::PlayerThinking {
                round: 1,
                player_id: PlayerId::from("Player_1"),
            },
            GameEvent::error("backend unavailable"),
        ]
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/game.jsonl");
        let log = JsonlEventLog::create(&path).unwrap();

        for event in sample_events() {
            log.emit(&event);
        }
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 3);

        for (i, line) in lines.iter().enumerate() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["seq"], (i + 1) as u64);
            assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
        }
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "round_start");
        assert_eq!(first["total_rounds"], 2);
    }

    #[test]
    fn test_read_back_matches_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.jsonl");
        let log = JsonlEventLog::create(&path).unwrap();
        for event in sample_events() {
            log.emit(&event);
        }

        // Flushed per line, so readable while the writer is alive
        let events = read_event_log(&path).unwrap();
        assert_eq!(events, sample_events());
        assert_eq!(log.path(), path.as_path());
    }

    #[test]
    fn test_error_only_log_replays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.jsonl");
        let log = JsonlEventLog::create(&path).unwrap();
        log.emit(&GameEvent::error(
            "Invalid game configuration: num_players must be at least 3 (got 2)",
        ));
        drop(log);

        let replay = GameReplay::from_events(&read_event_log(&path).unwrap()).unwrap();
        assert!(replay.is_finished());
        assert!(replay.error().is_some());
    }

    #[test]
    fn test_read_reports_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jsonl");
        std::fs::write(&path, "{\"type\": \"round_end\", \"round\": 1}\n\nnot json\n").unwrap();

        let err = read_event_log(&path).unwrap_err();
        assert!(matches!(err, EventLogError::Parse { line: 3, .. }));
    }
}
