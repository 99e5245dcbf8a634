//! Domain entities for chat, registration, and session state

pub mod message;
pub mod registration;
pub mod session;
pub mod thread;

pub use message::{ChatMessage, QueryAnswer, ResultSet};
pub use registration::{PendingRegistration, RegistrationFlow, RegistrationStep};
pub use session::{permission_scope, ModuleRole, ModuleRoles, SessionClaims};
pub use thread::{ChatThread, DEFAULT_THREAD_TITLE};
