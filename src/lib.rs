// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds CLI parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod results;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod ui;

pub use error::{Result, TyperError};
pub use session::Session;
