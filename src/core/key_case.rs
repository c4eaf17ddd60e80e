//! Named key cases usable as transformers.
//!
//! Each case wraps a `heck` conversion (or plain lower/upper casing) so a
//! transformer can be chosen by name from settings files or the CLI.

use std::fmt;
use std::str::FromStr;

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToTitleCase, ToTrainCase, ToUpperCamelCase,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::convert::{KeyTransform, KeyTree};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCase {
    Lower,
    Upper,
    Snake,
    Kebab,
    Camel,
    Pascal,
    ShoutySnake,
    ShoutyKebab,
    Title,
    Train,
}

impl KeyCase {
    pub const ALL: &'static [KeyCase] = &[
        KeyCase::Lower,
        KeyCase::Upper,
        KeyCase::Snake,
        KeyCase::Kebab,
        KeyCase::Camel,
        KeyCase::Pascal,
        KeyCase::ShoutySnake,
        KeyCase::ShoutyKebab,
        KeyCase::Title,
        KeyCase::Train,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyCase::Lower => "lower",
            KeyCase::Upper => "upper",
            KeyCase::Snake => "snake",
            KeyCase::Kebab => "kebab",
            KeyCase::Camel => "camel",
            KeyCase::Pascal => "pascal",
            KeyCase::ShoutySnake => "shouty_snake",
            KeyCase::ShoutyKebab => "shouty_kebab",
            KeyCase::Title => "title",
            KeyCase::Train => "train",
        }
    }

    pub fn apply(&self, key: &str) -> String {
        match self {
            KeyCase::Lower => key.to_lowercase(),
            KeyCase::Upper => key.to_uppercase(),
            KeyCase::Snake => key.to_snake_case(),
            KeyCase::Kebab => key.to_kebab_case(),
            KeyCase::Camel => key.to_lower_camel_case(),
            KeyCase::Pascal => key.to_upper_camel_case(),
            KeyCase::ShoutySnake => key.to_shouty_snake_case(),
            KeyCase::ShoutyKebab => key.to_shouty_kebab_case(),
            KeyCase::Title => key.to_title_case(),
            KeyCase::Train => key.to_train_case(),
        }
    }

    /// Resolve a transformer given as data.
    ///
    /// Only strings naming a known case resolve; every other value is
    /// rejected with its JSON type in the message.
    pub fn from_spec(spec: &Value) -> Result<KeyCase> {
        match spec {
            Value::String(name) => name.parse(),
            other => Err(Error::invalid_transformer(other.type_name(), None)),
        }
    }

    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl KeyTransform for KeyCase {
    fn transform_key(&self, key: &str) -> String {
        self.apply(key)
    }
}

impl FromStr for KeyCase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let case = match normalized.as_str() {
            "lower" | "lowercase" => KeyCase::Lower,
            "upper" | "uppercase" => KeyCase::Upper,
            "snake" | "snakecase" => KeyCase::Snake,
            "kebab" | "kebabcase" => KeyCase::Kebab,
            "camel" | "camelcase" | "lowercamel" | "lowercamelcase" => KeyCase::Camel,
            "pascal" | "pascalcase" | "uppercamel" | "uppercamelcase" => KeyCase::Pascal,
            "shoutysnake" | "shoutysnakecase" | "screamingsnake" | "screamingsnakecase"
            | "constant" | "constantcase" => KeyCase::ShoutySnake,
            "shoutykebab" | "shoutykebabcase" | "screamingkebab" | "screamingkebabcase"
            | "cobol" | "cobolcase" => KeyCase::ShoutyKebab,
            "title" | "titlecase" => KeyCase::Title,
            "train" | "traincase" => KeyCase::Train,
            _ => return Err(Error::invalid_transformer("string", Some(s.to_string()))),
        };

        Ok(case)
    }
}

impl fmt::Display for KeyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for KeyCase {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for KeyCase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|e: Error| serde::de::Error::custom(e.message))
    }
}
