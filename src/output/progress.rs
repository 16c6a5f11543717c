//! Human-readable progress lines for verbose runs

use crate::crawler::{AttemptFailure, CrawlEvent, CrawlObserver};
use std::io::{self, Write};

/// Echoes crawl events with a status marker: `[*]` info, `[+]` found,
/// `[-]` miss, `[!]` error
pub struct ProgressReporter<W: Write> {
    writer: W,
}

impl ProgressReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Formats one progress line
pub fn progress_line(event: &CrawlEvent) -> String {
    match event {
        CrawlEvent::Started { start_id, .. } => format!("[*] Starting crawl from ID {}", start_id),
        CrawlEvent::AttemptFailed { failure, .. } => {
            let marker = match failure {
                AttemptFailure::Network(_) => "[!]",
                AttemptFailure::Http(_) => "[-]",
                AttemptFailure::NoData => "[*]",
            };
            format!("{} {}", marker, event)
        }
        CrawlEvent::Accepted { .. } => format!("[+] {}", event),
        CrawlEvent::IdExhausted { .. } => format!("[-] {}", event),
        CrawlEvent::BatchSaveFailed { .. } => format!("[!] {}", event),
        CrawlEvent::BatchSaved { .. } | CrawlEvent::Stopped { .. } | CrawlEvent::Finished { .. } => {
            format!("[*] {}", event)
        }
    }
}

impl<W: Write> CrawlObserver for ProgressReporter<W> {
    fn on_event(&mut self, event: &CrawlEvent) {
        if let Err(e) = writeln!(self.writer, "{}", progress_line(event)) {
            tracing::warn!("Failed to write progress: {}", e);
        }
    }
}
