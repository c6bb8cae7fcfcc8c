//! Shared types for the campus portal
//!
//! Common types used by the portal server and its clients: API DTOs,
//! the response envelope, error codes and small utilities.

pub mod client;
pub mod error;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::ApiErrorCode;
pub use response::ApiResponse;
