//! # DataChat Core
//!
//! Core domain logic for the DataChat client SDK.
//! This crate contains domain entities, the phone validation subsystem,
//! the registration/OTP state machine, the chat polling engine, gateway
//! interfaces, and error types that form the foundation of the client.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
