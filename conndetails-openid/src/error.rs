use conndetails_core::ConfigError;

/// Errors raised while building or running a projector.
///
/// The default (lenient) projector never returns
/// [`NonStringValue`](ProjectionError::NonStringValue); it only appears
/// when strict mode is switched on.
#[derive(Debug)]
pub enum ProjectionError {
    /// A recognized field holds something other than a string.
    NonStringValue { field: String, found: &'static str },

    /// A key table entry has an empty field, simplified or legacy name.
    EmptyKeyName { field: String, part: &'static str },

    /// Two entries of the key table claim the same name.
    KeyCollision { key: String },

    /// The projector configuration could not be read.
    Config(ConfigError),
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::NonStringValue { field, found } => {
                write!(f, "Attribute '{field}' must be a string, found {found}")
            }
            ProjectionError::EmptyKeyName { field, part } => {
                write!(f, "Connection key for '{field}' has an empty {part} name")
            }
            ProjectionError::KeyCollision { key } => {
                write!(f, "Connection key '{key}' is already mapped")
            }
            ProjectionError::Config(err) => write!(f, "Invalid projector configuration: {err}"),
        }
    }
}

impl std::error::Error for ProjectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectionError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ProjectionError {
    fn from(err: ConfigError) -> Self {
        ProjectionError::Config(err)
    }
}
