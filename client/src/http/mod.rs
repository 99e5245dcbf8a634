//! HTTP plumbing for the DataChat API

mod client;

pub use client::{ApiClient, ClientError};
