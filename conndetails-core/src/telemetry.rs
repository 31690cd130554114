use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

use crate::config::ConfigError;

/// Handle on the filter of the installed subscriber.
pub struct TracingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl TracingHandle {
    /// Replace the default filter, typically with `logging.filter` once the
    /// configuration is loaded. Events emitted before the call were filtered
    /// with the previous directives. `RUST_LOG` still wins when set.
    pub fn set_filter(&self, directives: &str) -> Result<(), ConfigError> {
        let filter = EnvFilter::try_new(directives).map_err(|_| ConfigError::TypeMismatch {
            key: "logging.filter".to_string(),
            expected: "tracing filter directives",
        })?;
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return Ok(());
        }
        // Fails only if the subscriber was dropped, i.e. another one was
        // installed first.
        let _ = self.filter.reload(filter);
        Ok(())
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Output goes to stderr so stdout
/// stays clean for command output. Calling this more than once is harmless;
/// only the first subscriber is installed.
pub fn init_tracing(default_filter: &str) -> TracingHandle {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(filter);

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    TracingHandle { filter: handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_filter_validates_directives() {
        let handle = init_tracing("info");
        assert!(handle.set_filter("debug,conndetails_core=trace").is_ok());
        assert!(matches!(
            handle.set_filter("conndetails_core=notalevel"),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }
}
