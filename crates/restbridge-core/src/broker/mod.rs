//! Broker / orchestrator
//!
//! ```text
//! Connecting ─► CatalogFetched ─► Deciding ─┬─► Answering ─┬─► Done
//!                                           └─► Invoking ──┘
//! ```
//!
//! The catalog connection opened in `Connecting` is closed in `Done` on
//! every path, including errors.

mod error;
mod render;
mod session;
mod state;

pub use error::{BrokerError, BrokerResult, SessionFailure};
pub use render::{render_payload, SessionHeader, SessionOutcome, SessionReport};
pub use session::Broker;
pub use state::SessionState;
