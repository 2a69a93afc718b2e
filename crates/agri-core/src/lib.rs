//! Core building blocks for agri-assist
//!
//! This crate holds the pieces shared by the assistant router and the market
//! price pipeline:
//!
//! - The workspace-wide error type
//! - Ordered fallback chains (`first_success`, `first_available`)
//! - The `HttpTransport` seam and its reqwest-backed implementation

pub mod error;
pub mod fallback;
pub mod transport;

pub use error::{Error, Result};
pub use fallback::{Exhausted, Success, first_available, first_success};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
