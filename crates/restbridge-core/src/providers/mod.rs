//! Model backends and the decision step
//!
//! ## Architecture
//!
//! ```text
//! prompt + FunctionDeclarations
//!        │
//!        ▼
//!   decide() ──► ModelBackend::generate() ──► ModelReply
//!        │                                       │
//!        └──────────── interpret_reply() ◄───────┘
//!                            │
//!                            ▼
//!                      ModelDecision
//! ```
//!
//! `GenaiBackend` talks to Gemini through the `genai` crate. `MockBackend` is
//! kept for testing.

mod traits;
mod error;
mod decision;
mod genai_adapter;
mod genai_provider;
mod mock;

// Core traits and types
pub use traits::{FunctionCallPart, ModelBackend, ModelReply, ModelRequest};
pub use error::{ProviderError, ProviderResult};
pub use decision::{decide, interpret_reply};

// The real backend
pub use genai_provider::GenaiBackend;
pub use genai_adapter::{create_client, to_genai_tool, to_genai_tools};

// Mock backend for testing
pub use mock::{MockBackend, MockMode};
