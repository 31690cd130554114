use std::borrow::Cow;

use conndetails_core::config::{ConfigError, ConfigValue, FromConfigValue};

/// Prefix of the legacy dotted key family.
pub const LEGACY_PREFIX: &str = "attribute.";

/// Maps one source attribute to the two connection detail keys it is
/// published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionKey {
    field: Cow<'static, str>,
    simplified: Cow<'static, str>,
    legacy: Cow<'static, str>,
}

impl ConnectionKey {
    /// Key for `field`, published as `simplified` and `attribute.<field>`.
    pub fn new(field: impl Into<String>, simplified: impl Into<String>) -> Self {
        let field = field.into();
        let legacy = format!("{LEGACY_PREFIX}{field}");
        Self {
            field: Cow::Owned(field),
            simplified: Cow::Owned(simplified.into()),
            legacy: Cow::Owned(legacy),
        }
    }

    /// Override the derived legacy key.
    pub fn with_legacy(mut self, legacy: impl Into<String>) -> Self {
        self.legacy = Cow::Owned(legacy.into());
        self
    }

    const fn builtin(field: &'static str, simplified: &'static str, legacy: &'static str) -> Self {
        Self {
            field: Cow::Borrowed(field),
            simplified: Cow::Borrowed(simplified),
            legacy: Cow::Borrowed(legacy),
        }
    }

    /// Source attribute name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Camel-case key, the preferred name.
    pub fn simplified(&self) -> &str {
        &self.simplified
    }

    /// Dotted `attribute.<field>` key kept for older consumers.
    pub fn legacy(&self) -> &str {
        &self.legacy
    }
}

/// Connection detail keys of an OpenID client registration.
pub const OPENID_CLIENT_KEYS: [ConnectionKey; 3] = [
    ConnectionKey::builtin("client_secret", "clientSecret", "attribute.client_secret"),
    ConnectionKey::builtin("client_id", "clientID", "attribute.client_id"),
    ConnectionKey::builtin(
        "service_account_user_id",
        "serviceAccountUserId",
        "attribute.service_account_user_id",
    ),
];

/// Reads `{ field, simplified, legacy? }` entries from `connection.extra_fields`.
impl FromConfigValue for ConnectionKey {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let ConfigValue::Map(map) = value else {
            return Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "map with `field` and `simplified`",
            });
        };
        let required = |name: &str| -> Result<String, ConfigError> {
            let full_key = format!("{key}.{name}");
            let raw = map
                .get(name)
                .ok_or_else(|| ConfigError::NotFound(full_key.clone()))?;
            let s = String::from_config_value(raw, &full_key)?;
            if s.is_empty() {
                return Err(ConfigError::TypeMismatch {
                    key: full_key,
                    expected: "non-empty string",
                });
            }
            Ok(s)
        };

        let connection_key = ConnectionKey::new(required("field")?, required("simplified")?);
        match map.get("legacy") {
            None | Some(ConfigValue::Null) => Ok(connection_key),
            Some(_) => Ok(connection_key.with_legacy(required("legacy")?)),
        }
    }
}
