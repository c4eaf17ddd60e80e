//! JSON, YAML, and TOML documents as converter input.
//!
//! TOML documents keep their own value model through conversion so
//! datetimes stay scalars; they only become strings when rendered as JSON
//! or YAML.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::convert::{KeyConverter, KeyTransform, KeyTree, ValueKind};
use crate::error::{Error, Result};
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Format::from_extension(s.trim()).ok_or_else(|| {
            Error::validation_invalid_argument(
                "format",
                format!("Unknown document format '{}'", s),
                Some(s.to_string()),
                Some(vec![
                    "json".to_string(),
                    "yaml".to_string(),
                    "toml".to_string(),
                ]),
            )
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl KeyTree for toml::Value {
    fn kind(&self) -> ValueKind {
        match self {
            toml::Value::Table(_) => ValueKind::Mapping,
            toml::Value::Array(_) => ValueKind::Sequence,
            _ => ValueKind::Scalar,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            toml::Value::String(_) => "string",
            toml::Value::Integer(_) | toml::Value::Float(_) => "number",
            toml::Value::Boolean(_) => "boolean",
            toml::Value::Datetime(_) => "datetime",
            toml::Value::Array(_) => "array",
            toml::Value::Table(_) => "object",
        }
    }

    fn missing_repr(&self) -> Option<String> {
        match self {
            toml::Value::Boolean(false) => Some("false".to_string()),
            toml::Value::Integer(0) => Some("0".to_string()),
            toml::Value::Float(f) if *f == 0.0 => Some(f.to_string()),
            toml::Value::String(s) if s.is_empty() => Some(String::new()),
            _ => None,
        }
    }

    fn map_entries<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str, &Self) -> (String, Self),
    {
        match self {
            toml::Value::Table(table) => toml::Value::Table(
                table
                    .iter()
                    .map(|(key, value)| f(key.as_str(), value))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn map_items<F>(&self, f: F) -> Self
    where
        F: FnMut(&Self) -> Self,
    {
        match self {
            toml::Value::Array(items) => toml::Value::Array(items.iter().map(f).collect()),
            other => other.clone(),
        }
    }
}

/// JSON view of a TOML value. Datetimes become their TOML text; non-finite
/// floats have no JSON form and become null.
fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_json(value)))
                .collect(),
        ),
    }
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Value(Value),
    Toml(toml::Value),
}

impl Document {
    pub fn convert<T: KeyTransform>(&self, converter: &KeyConverter<T>) -> Result<Document> {
        match self {
            Document::Value(value) => converter.convert(value).map(Document::Value),
            Document::Toml(value) => converter.convert(value).map(Document::Toml),
        }
    }

    pub fn as_value(&self) -> Cow<'_, Value> {
        match self {
            Document::Value(value) => Cow::Borrowed(value),
            Document::Toml(value) => Cow::Owned(toml_to_json(value)),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Document::Value(value) => value,
            Document::Toml(value) => toml_to_json(&value),
        }
    }
}

pub fn parse(text: &str, format: Format) -> Result<Document> {
    let parsed = match format {
        Format::Json => serde_json::from_str(text)
            .map(Document::Value)
            .map_err(|e| e.to_string()),
        Format::Yaml => serde_yml::from_str(text)
            .map(Document::Value)
            .map_err(|e| e.to_string()),
        Format::Toml => toml::from_str::<toml::Table>(text)
            .map(|table| Document::Toml(toml::Value::Table(table)))
            .map_err(|e| e.to_string()),
    };

    parsed.map_err(|e| Error::document_parse_failed(format.as_str(), e))
}

/// Render a document. JSON output is pretty-printed with a trailing newline.
pub fn render(document: &Document, format: Format) -> Result<String> {
    let rendered = match (document, format) {
        (Document::Toml(value), Format::Toml) => {
            toml::to_string_pretty(value).map_err(|e| e.to_string())
        }
        (_, Format::Toml) => {
            toml::to_string_pretty(document.as_value().as_ref()).map_err(|e| e.to_string())
        }
        (_, Format::Json) => serde_json::to_string_pretty(document.as_value().as_ref())
            .map(|s| s + "\n")
            .map_err(|e| e.to_string()),
        (_, Format::Yaml) => {
            serde_yml::to_string(document.as_value().as_ref()).map_err(|e| e.to_string())
        }
    };

    rendered.map_err(|e| Error::document_render_failed(format.as_str(), e))
}

/// Parse `text` and convert its keys.
pub fn convert_document<T: KeyTransform>(
    text: &str,
    format: Format,
    converter: &KeyConverter<T>,
) -> Result<Document> {
    parse(text, format)?.convert(converter)
}

/// Render `document` and write it atomically to `path`.
pub fn write_document(path: &Path, document: &Document, format: Format) -> Result<()> {
    let rendered = render(document, format)?;
    io::write_file_atomic(path, &rendered, "write document")?;

    crate::log_status!("convert", "Wrote {} ({})", path.display(), format);

    Ok(())
}
