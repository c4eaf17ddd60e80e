pub mod convert;
pub mod document;
pub mod error;
pub mod key_case;
pub mod settings;

// Re-export common types for convenience
pub use convert::{
    convert, convert_serializable, convert_with_spec, KeyConverter, KeyTransform, KeyTree,
    ValueKind,
};
pub use document::{Document, Format};
pub use error::{Error, ErrorCode, Result};
pub use key_case::KeyCase;
pub use settings::ConvertSettings;
