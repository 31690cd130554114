//! Shared building blocks for conndetails.
//!
//! - [`attributes`]: the dynamically typed attribute set handed over by the
//!   resource layer.
//! - [`config`]: layered YAML + environment configuration.
//! - [`telemetry`]: `tracing` subscriber setup.

pub mod attributes;
pub mod config;
pub mod telemetry;

pub use attributes::{AttributeError, AttributeSet, AttributeValue};
pub use config::{ConfigError, ConfigValue, ConnConfig, FromConfigValue};
pub use telemetry::{init_tracing, TracingHandle};

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::{AttributeSet, AttributeValue, ConnConfig};
}
