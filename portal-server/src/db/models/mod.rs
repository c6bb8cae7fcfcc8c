//! Database Models

pub mod serde_helpers;
pub mod user;

pub use user::{User, UserCreate, UserId, UserRole, UserUpdate};
