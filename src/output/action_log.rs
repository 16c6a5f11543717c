//! Timestamped action log
//!
//! Every crawl event becomes one `[ACTION] YYYY-MM-DD HH:MM:SS <message>`
//! line. The log is write-only; nothing reads it back.

use crate::crawler::{CrawlEvent, CrawlObserver};
use chrono::Local;
use std::io::{self, Write};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes one action line per crawl event
pub struct ActionLog<W: Write> {
    writer: W,
}

impl ActionLog<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ActionLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CrawlObserver for ActionLog<W> {
    fn on_event(&mut self, event: &CrawlEvent) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let written = writeln!(self.writer, "[ACTION] {} {}", timestamp, event)
            .and_then(|_| self.writer.flush());
        if let Err(e) = written {
            tracing::warn!("Failed to write action log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_action_line_format() {
        let mut log = ActionLog::new(Vec::new());
        log.on_event(&CrawlEvent::Started {
            start_id: 34001,
            resume_point: 34000,
        });
        log.on_event(&CrawlEvent::Finished { new_records: 2 });

        let output = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let rest = lines[0].strip_prefix("[ACTION] ").unwrap();
        let (timestamp, message) = rest.split_at(19);
        assert!(NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(message, " Start crawl from ID 34001");
        assert!(lines[1].ends_with(" Crawl finished. New records: 2"));
    }
}
