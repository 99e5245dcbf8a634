//! Business services: chat engine, registration flow, session handling

pub mod chat;
pub mod registration;
pub mod session;
