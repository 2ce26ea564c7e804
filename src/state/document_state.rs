use crate::output::PageReport;
use std::fmt;

/// Terminal state of one fetch unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentState {
    // ===== Success =====
    /// Body fetched and handed to the parse pool
    Fetched,

    // ===== Skip =====
    /// Response arrived with a non-success status; not an error
    Filtered { status_code: u16 },

    // ===== Error =====
    /// Connection, DNS, TLS, or timeout failure before a response arrived
    Unreachable,

    /// Success status, but the body could not be read in full
    BodyReadFailed,

    /// Body fetched but no parse unit was left to receive it
    Undelivered,
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetched => write!(f, "fetched"),
            Self::Filtered { status_code } => write!(f, "filtered (HTTP {})", status_code),
            Self::Unreachable => write!(f, "unreachable"),
            Self::BodyReadFailed => write!(f, "body read failed"),
            Self::Undelivered => write!(f, "undelivered"),
        }
    }
}

/// Terminal state of one parse unit
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// A document was received, parsed, and reported
    Reported(PageReport),

    /// A document was received but the tree could not be built
    TreeFailed { url: String },

    /// The channel closed before any document reached this unit
    Idle,
}

impl ParseOutcome {
    /// Returns the report, if one was produced
    pub fn report(&self) -> Option<&PageReport> {
        match self {
            Self::Reported(report) => Some(report),
            _ => None,
        }
    }

    pub fn into_report(self) -> Option<PageReport> {
        match self {
            Self::Reported(report) => Some(report),
            _ => None,
        }
    }
}
