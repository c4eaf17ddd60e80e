use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidValue,

    ValidationMissingInput,
    ValidationInvalidInputType,
    ValidationInvalidTransformer,
    ValidationInvalidArgument,

    DocumentParseFailed,
    DocumentRenderFailed,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationMissingInput => "validation.missing_input",
            ErrorCode::ValidationInvalidInputType => "validation.invalid_input_type",
            ErrorCode::ValidationInvalidTransformer => "validation.invalid_transformer",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::DocumentParseFailed => "document.parse_failed",
            ErrorCode::DocumentRenderFailed => "document.render_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingInputDetails {
    pub received: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidTypeDetails {
    pub expected: Vec<String>,
    pub received_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentErrorDetails {
    pub format: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    /// Input was falsy (`null`, `false`, `0`, `""`).
    pub fn missing_input(received: impl Into<String>) -> Self {
        let received = received.into();
        let message = format!(
            "Input is required and must be either an object or an array, received {}",
            received
        );
        Self::new(
            ErrorCode::ValidationMissingInput,
            message,
            to_details(MissingInputDetails { received }),
        )
    }

    pub fn invalid_input_type(received_type: impl Into<String>) -> Self {
        let received_type = received_type.into();
        let message = format!(
            "Expected either an object or an array, received {}",
            received_type
        );
        Self::new(
            ErrorCode::ValidationInvalidInputType,
            message,
            to_details(InvalidTypeDetails {
                expected: vec!["object".to_string(), "array".to_string()],
                received_type,
                received: None,
            }),
        )
    }

    /// The transformer spec did not resolve to a usable key transformer.
    ///
    /// `received` carries the offending name when the spec was a string.
    pub fn invalid_transformer(received_type: impl Into<String>, received: Option<String>) -> Self {
        let received_type = received_type.into();
        let message = match &received {
            Some(name) => format!(
                "Transformer must be a function or a known key case, received {} '{}'",
                received_type, name
            ),
            None => format!(
                "Transformer must be a function or a known key case, received {}",
                received_type
            ),
        };
        Self::new(
            ErrorCode::ValidationInvalidTransformer,
            message,
            to_details(InvalidTypeDetails {
                expected: vec!["function".to_string(), "key case".to_string()],
                received_type,
                received,
            }),
        )
        .with_hint("Run 'keyconv cases' to see available key cases")
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn document_parse_failed(format: impl Into<String>, error: impl Into<String>) -> Self {
        let format = format.into();
        let message = format!("Failed to parse {} document", format);
        Self::new(
            ErrorCode::DocumentParseFailed,
            message,
            to_details(DocumentErrorDetails {
                format,
                error: error.into(),
            }),
        )
    }

    pub fn document_render_failed(format: impl Into<String>, error: impl Into<String>) -> Self {
        let format = format.into();
        let message = format!("Failed to render {} document", format);
        Self::new(
            ErrorCode::DocumentRenderFailed,
            message,
            to_details(DocumentErrorDetails {
                format,
                error: error.into(),
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: hint.into(),
        });
        self
    }
}
