// Application layer - the controller that owns session state and talks to
// storage. Clients (CLI, interactive session, import/export) go through here.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
