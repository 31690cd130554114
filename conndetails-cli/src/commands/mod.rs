//! Command implementations for the `conndetails` CLI.
//!
//! Commands write to a caller-supplied [`std::io::Write`] so they can be
//! exercised without spawning the binary.

/// Key table listing: `conndetails keys`.
pub mod keys;

/// Projection: `conndetails project`.
///
/// Reads a JSON or YAML attribute document from a file or stdin and prints
/// the connection details as base64 JSON/YAML or as raw `key=value` lines.
pub mod project;

/// Shared result type of all commands.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
