//! Conversion settings loaded from a JSON, YAML, or TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::convert::KeyConverter;
use crate::document::{self, Format};
use crate::error::{Error, Result};
use crate::key_case::KeyCase;
use crate::utils::io;

fn default_deep_transform() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConvertSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<KeyCase>,
    #[serde(default = "default_deep_transform")]
    pub deep_transform: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            case: None,
            deep_transform: default_deep_transform(),
            format: None,
        }
    }
}

impl ConvertSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let format = Format::from_path(path).ok_or_else(|| {
            Error::config_invalid_value(
                "settings",
                Some(path.display().to_string()),
                "Settings file must end in .json, .yaml, .yml, or .toml",
            )
        })?;

        let text = io::read_file(path, "read settings file")?;
        let value = document::parse(&text, format)?.into_value();

        serde_json::from_value(value).map_err(|e| {
            Error::config_invalid_value("settings", Some(path.display().to_string()), e.to_string())
        })
    }

    /// Apply command-line overrides on top of loaded settings.
    pub fn merge(
        mut self,
        case: Option<KeyCase>,
        shallow: bool,
        format: Option<Format>,
    ) -> Self {
        if case.is_some() {
            self.case = case;
        }
        if shallow {
            self.deep_transform = false;
        }
        if format.is_some() {
            self.format = format;
        }
        self
    }

    pub fn converter(&self) -> Result<KeyConverter<KeyCase>> {
        let case = self.case.ok_or_else(|| {
            Error::validation_invalid_argument(
                "case",
                "A key case is required",
                None,
                Some(KeyCase::names()),
            )
            .with_hint("Pass --case NAME or set \"case\" in the settings file")
        })?;

        Ok(KeyConverter::new(case).deep_transform(self.deep_transform))
    }
}
