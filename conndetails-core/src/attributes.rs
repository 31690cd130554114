use std::collections::HashMap;

/// A single resource attribute of unspecified type.
///
/// Resource layers hand attributes over as loosely typed data (decoded
/// JSON, YAML, or state read back from a provider). Consumers match on the
/// variant they expect and treat everything else as absent or invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<AttributeValue>),
    Map(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Returns the contained string, or `None` for every other variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Short variant name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "string",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Float(_) => "float",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Null => "null",
            AttributeValue::List(_) => "list",
            AttributeValue::Map(_) => "map",
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => AttributeValue::Null,
            serde_json::Value::Bool(b) => AttributeValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttributeValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    AttributeValue::Float(f)
                } else {
                    AttributeValue::String(n.to_string())
                }
            }
            serde_json::Value::String(s) => AttributeValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                AttributeValue::List(items.iter().map(AttributeValue::from_json).collect())
            }
            serde_json::Value::Object(map) => AttributeValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), AttributeValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => AttributeValue::Null,
            serde_yaml::Value::Bool(b) => AttributeValue::Bool(*b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttributeValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    AttributeValue::Float(f)
                } else {
                    AttributeValue::String(n.to_string())
                }
            }
            serde_yaml::Value::String(s) => AttributeValue::String(s.clone()),
            serde_yaml::Value::Sequence(seq) => {
                AttributeValue::List(seq.iter().map(AttributeValue::from_yaml).collect())
            }
            serde_yaml::Value::Mapping(map) => AttributeValue::Map(
                map.iter()
                    .map(|(k, v)| (yaml_key(k), AttributeValue::from_yaml(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => AttributeValue::from_yaml(&tagged.value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// Render a YAML mapping key as a string. Scalars use their plain text.
pub(crate) fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(&tagged.value),
        other => format!("{other:?}"),
    }
}

/// Error raised while reading an attribute document.
#[derive(Debug)]
pub enum AttributeError {
    /// The document is not valid JSON/YAML.
    Parse(String),
    /// The document root is not a mapping.
    NotAMapping { found: &'static str },
}

impl std::fmt::Display for AttributeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeError::Parse(msg) => write!(f, "Attribute document parse error: {msg}"),
            AttributeError::NotAMapping { found } => {
                write!(f, "Attribute document must be a mapping, found {found}")
            }
        }
    }
}

impl std::error::Error for AttributeError {}

/// Attributes describing one managed resource, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    values: HashMap<String, AttributeValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Returns the attribute only if it holds a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build an attribute set from an already decoded JSON document.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, AttributeError> {
        match AttributeValue::from_json(value) {
            AttributeValue::Map(values) => Ok(Self { values }),
            other => Err(AttributeError::NotAMapping {
                found: other.type_name(),
            }),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, AttributeError> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| AttributeError::Parse(e.to_string()))?;
        Self::from_json_value(&value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, AttributeError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| AttributeError::Parse(e.to_string()))?;
        match AttributeValue::from_yaml(&value) {
            AttributeValue::Map(values) => Ok(Self { values }),
            other => Err(AttributeError::NotAMapping {
                found: other.type_name(),
            }),
        }
    }
}

impl From<HashMap<String, AttributeValue>> for AttributeSet {
    fn from(values: HashMap<String, AttributeValue>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
