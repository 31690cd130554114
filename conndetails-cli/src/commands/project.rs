use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use conndetails_core::{AttributeSet, ConnConfig};
use conndetails_openid::{ConnectionDetails, ConnectionDetailsProjector, OpenIdClientProjector};

use super::CommandResult;

/// Output encoding of the connection details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON object, values base64-encoded.
    #[default]
    Json,
    /// YAML mapping, values base64-encoded.
    Yaml,
    /// `key=value` lines with raw values.
    Text,
}

/// Encoding of the attribute document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// YAML for `.yaml`/`.yml` files, JSON otherwise.
    pub fn detect(path: Option<&Path>, force_yaml: bool) -> Self {
        if force_yaml {
            return InputFormat::Yaml;
        }
        match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// Options of `conndetails project`.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Attribute document; stdin when `None`.
    pub input: Option<PathBuf>,
    /// Parse the input as YAML regardless of its extension.
    pub yaml: bool,
    pub format: OutputFormat,
    /// Force strict mode on top of the configuration.
    pub strict: bool,
}

/// Read the attribute document, project it and write the result to `out`.
pub fn run(config: &ConnConfig, options: &ProjectOptions, out: &mut dyn Write) -> CommandResult {
    let content = match &options.input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let input_format = InputFormat::detect(options.input.as_deref(), options.yaml);
    let attributes = parse_attributes(&content, input_format)?;

    let mut projector = OpenIdClientProjector::from_config(config)?;
    if options.strict {
        projector = projector.strict();
    }

    let details = projector.project(&attributes)?;
    tracing::info!(entries = details.len(), "connection details ready");
    out.write_all(render(&details, options.format)?.as_bytes())?;
    Ok(())
}

pub fn parse_attributes(
    content: &str,
    format: InputFormat,
) -> Result<AttributeSet, conndetails_core::AttributeError> {
    match format {
        InputFormat::Json => AttributeSet::from_json_str(content),
        InputFormat::Yaml => AttributeSet::from_yaml_str(content),
    }
}

/// Render connection details in the requested format.
pub fn render(
    details: &ConnectionDetails,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(details)?;
            s.push('\n');
            s
        }
        OutputFormat::Yaml => serde_yaml::to_string(details)?,
        OutputFormat::Text => details
            .iter()
            .map(|(key, value)| format!("{key}={}\n", String::from_utf8_lossy(value)))
            .collect(),
    };
    Ok(rendered)
}
