//! Tool catalog: the process boundary that lists and runs named operations
//!
//! ```text
//! ┌──────────────────────┐   MCP over stdio   ┌───────────────────────────┐
//! │ Broker               │ ─────────────────▶ │ RestCatalogServer         │
//! │  McpClient           │   tools/list       │  call_rest_api            │
//! │  (ToolCatalog trait) │   tools/call       │   └─ http::invoke         │
//! └──────────────────────┘                    └───────────────────────────┘
//! ```
//!
//! The server side is `RestCatalogServer` (normally run as `restbridge serve`).
//! The broker talks to it through the `ToolCatalog` / `CatalogConnector`
//! traits, implemented by `McpClient` / `ChildProcessConnector` and, for
//! tests, by `MockCatalog`.

mod client;
mod error;
mod mock;
mod server;
mod traits;

pub use client::{ChildProcessConnector, McpClient};
pub use error::{CatalogError, CatalogResult};
pub use mock::MockCatalog;
pub use server::{RestCatalogServer, REST_TOOL_NAME};
pub use traits::{CatalogConnector, ToolCatalog};
