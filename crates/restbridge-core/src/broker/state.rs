//! Broker session states

use std::fmt;

/// Where a session is in its lifecycle
///
/// `Connecting → CatalogFetched → Deciding → (Answering | Invoking) → Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    CatalogFetched,
    Deciding,
    Answering,
    Invoking,
    Done,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::CatalogFetched => "catalog-fetched",
            Self::Deciding => "deciding",
            Self::Answering => "answering",
            Self::Invoking => "invoking",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
