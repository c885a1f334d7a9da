//! Structured logging with file output.
//!
//! The plugin logs through `tracing` macros everywhere (spans per handled
//! event, debug events for state transitions). This module installs the
//! subscriber that turns those into lines in a size-rotated log file:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → plugin.log (+ 3 backups)
//! ```
//!
//! Hosts that already install their own subscriber simply skip
//! [`init_tracing`]; the plugin's events then flow into the host's channel.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - [`file_writer`]: Rotating file writer used as the `fmt` layer's sink

pub mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
