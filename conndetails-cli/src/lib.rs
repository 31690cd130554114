//! # conndetails-cli
//!
//! Command-line front end for the connection details projector.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `conndetails project` | Read an attribute document and print its connection details |
//! | `conndetails keys` | Print the active key table |
//!
//! Both commands read `conndetails.yaml` / `conndetails-{profile}.yaml` from
//! the config directory (see [`conndetails_core::ConnConfig`]).

pub mod commands;
