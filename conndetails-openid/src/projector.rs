use conndetails_core::{AttributeSet, AttributeValue, ConnConfig};

use crate::details::ConnectionDetails;
use crate::error::ProjectionError;
use crate::keys::{ConnectionKey, OPENID_CLIENT_KEYS};

/// Turns a resource's attributes into connection details.
///
/// Implementations must be pure: the same attribute set always yields the
/// same map, and nothing is retained between calls.
pub trait ConnectionDetailsProjector: Send + Sync {
    fn project(&self, attributes: &AttributeSet) -> Result<ConnectionDetails, ProjectionError>;
}

/// How a recognized field holding a non-string value is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Skip the field, exactly like an absent one.
    #[default]
    Lenient,
    /// Fail the projection with [`ProjectionError::NonStringValue`].
    ///
    /// `null` and empty strings are still skipped.
    Strict,
}

/// Projector for OpenID client registrations.
///
/// For every entry of its key table whose attribute is a non-empty string,
/// the value is published under both the simplified and the legacy key.
///
/// # Example
///
/// ```
/// use conndetails_core::AttributeSet;
/// use conndetails_openid::{ConnectionKey, ConnectionDetailsProjector, OpenIdClientProjector};
///
/// # fn main() -> Result<(), conndetails_openid::ProjectionError> {
/// let projector = OpenIdClientProjector::new()
///     .strict()
///     .with_key(ConnectionKey::new("realm_id", "realmID"))?;
///
/// let attrs = AttributeSet::new().with("realm_id", "master");
/// let details = projector.project(&attrs)?;
/// assert_eq!(details.get_str("realmID"), Some("master"));
/// assert_eq!(details.get_str("attribute.realm_id"), Some("master"));
///
/// let attrs = AttributeSet::new().with("client_id", 42_i64);
/// assert!(projector.project(&attrs).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OpenIdClientProjector {
    keys: Vec<ConnectionKey>,
    strictness: Strictness,
}

impl OpenIdClientProjector {
    /// Built-in key table, lenient.
    pub fn new() -> Self {
        Self {
            keys: OPENID_CLIENT_KEYS.to_vec(),
            strictness: Strictness::Lenient,
        }
    }

    /// Switch to [`Strictness::Strict`].
    pub fn strict(self) -> Self {
        self.with_strictness(Strictness::Strict)
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Append a field to the key table.
    ///
    /// Fails if any of its names is empty, if the field is already mapped,
    /// or if either of its keys is already produced by another entry.
    pub fn with_key(mut self, key: ConnectionKey) -> Result<Self, ProjectionError> {
        for (part, name) in [
            ("field", key.field()),
            ("simplified", key.simplified()),
            ("legacy", key.legacy()),
        ] {
            if name.is_empty() {
                return Err(ProjectionError::EmptyKeyName {
                    field: key.field().to_string(),
                    part,
                });
            }
        }
        if key.simplified() == key.legacy() {
            return Err(ProjectionError::KeyCollision {
                key: key.simplified().to_string(),
            });
        }
        for existing in &self.keys {
            if existing.field() == key.field() {
                return Err(ProjectionError::KeyCollision {
                    key: key.field().to_string(),
                });
            }
            for name in [key.simplified(), key.legacy()] {
                if name == existing.simplified() || name == existing.legacy() {
                    return Err(ProjectionError::KeyCollision {
                        key: name.to_string(),
                    });
                }
            }
        }
        self.keys.push(key);
        Ok(self)
    }

    /// Build a projector from the `connection.*` config keys.
    ///
    /// | Key | Default |
    /// |-----|---------|
    /// | `connection.strict` | `false` |
    /// | `connection.extra_fields` | none |
    pub fn from_config(config: &ConnConfig) -> Result<Self, ProjectionError> {
        let strict = config.get_opt::<bool>("connection.strict")?.unwrap_or(false);
        let extra = config
            .get_opt::<Vec<ConnectionKey>>("connection.extra_fields")?
            .unwrap_or_default();

        let mut projector = Self::new();
        if strict {
            projector = projector.strict();
        }
        for key in extra {
            projector = projector.with_key(key)?;
        }
        tracing::debug!(
            strict,
            fields = projector.keys.len(),
            "connection details projector configured"
        );
        Ok(projector)
    }

    /// The active key table.
    pub fn keys(&self) -> &[ConnectionKey] {
        &self.keys
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }
}

impl Default for OpenIdClientProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionDetailsProjector for OpenIdClientProjector {
    fn project(&self, attributes: &AttributeSet) -> Result<ConnectionDetails, ProjectionError> {
        let mut details = ConnectionDetails::new();
        let mut qualifying = 0usize;

        for key in &self.keys {
            let value = match attributes.get(key.field()) {
                Some(AttributeValue::String(value)) if !value.is_empty() => value,
                Some(AttributeValue::String(_)) => {
                    tracing::trace!(field = key.field(), "skipping empty attribute");
                    continue;
                }
                None | Some(AttributeValue::Null) => {
                    tracing::trace!(field = key.field(), "skipping absent attribute");
                    continue;
                }
                Some(other) => match self.strictness {
                    Strictness::Lenient => {
                        tracing::trace!(
                            field = key.field(),
                            found = other.type_name(),
                            "skipping non-string attribute"
                        );
                        continue;
                    }
                    Strictness::Strict => {
                        return Err(ProjectionError::NonStringValue {
                            field: key.field().to_string(),
                            found: other.type_name(),
                        });
                    }
                },
            };

            details.insert(key.simplified(), value.as_bytes());
            details.insert(key.legacy(), value.as_bytes());
            qualifying += 1;
        }

        tracing::debug!(
            qualifying,
            entries = details.len(),
            "projected connection details"
        );
        Ok(details)
    }
}

/// Project `attributes` with the built-in key table in lenient mode.
pub fn project(attributes: &AttributeSet) -> Result<ConnectionDetails, ProjectionError> {
    OpenIdClientProjector::new().project(attributes)
}
