/// Crawl phase definitions
///
/// A run starts `Running` and ends in exactly one `Terminated` phase.
use std::fmt;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Too many consecutive IDs yielded nothing above the exhaustion floor
    Exhausted,

    /// The configured cap on IDs per run was reached
    IdLimit,

    /// A stop was requested from outside (Ctrl-C)
    Interrupted,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::IdLimit => "id_limit",
            Self::Interrupted => "interrupted",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current phase of the crawl state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    Running,
    Terminated(TerminationReason),
}

impl CrawlPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated(_))
    }

    pub fn reason(&self) -> Option<TerminationReason> {
        match self {
            Self::Running => None,
            Self::Terminated(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Terminated(reason) => write!(f, "terminated ({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_reason() {
        assert_eq!(CrawlPhase::Running.reason(), None);
        assert!(!CrawlPhase::Running.is_terminal());

        let done = CrawlPhase::Terminated(TerminationReason::Interrupted);
        assert!(done.is_terminal());
        assert_eq!(done.reason(), Some(TerminationReason::Interrupted));
        assert_eq!(done.to_string(), "terminated (interrupted)");
    }
}
