//! Generic REST invocation primitive
//!
//! One parameterized operation: issue a single HTTP request and return the
//! response body, or a normalized description of what went wrong.

mod invoke;
mod request;

pub use invoke::{invoke, try_invoke, InvocationFailure};
pub use request::{RequestBody, RestCall, DEFAULT_METHOD, DEFAULT_TIMEOUT_SECS};
