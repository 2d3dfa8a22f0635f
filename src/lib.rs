//! A function that describes its own invocation: it echoes the event, reports
//! the request id and memory limit of the context, and dumps the environment.
//!
//! `handler::handle` is pure; the binary captures the environment and adapts
//! the Lambda runtime's context before calling it.

pub mod error;
pub mod handler;
pub mod local;
pub mod runtime;
pub mod settings;
pub mod types;

pub use error::HandlerError;
pub use handler::{handle, handle_with_process_env};
pub use settings::Settings;
pub use types::{EnvSnapshot, Event, InvocationContext, Response, ResponseBody, TypeTagStyle};

// tests that touch process environment variables hold this
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
