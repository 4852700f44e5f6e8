//! Observability for csvderive
//!
//! Library code logs through the `log` facade; the CLI installs
//! [`JsonLogger`] so every event is one structured JSON line on stderr.

mod logger;

pub use logger::JsonLogger;
