//! Gateway implementations against the DataChat backend

mod admin;
mod auth;
mod chat;

pub use admin::{AdminApi, CreateUserRequest, UpdateUserRequest, User};
pub use auth::HttpAuthGateway;
pub use chat::HttpQueryGateway;
