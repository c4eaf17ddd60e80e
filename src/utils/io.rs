//! File and stdin I/O with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// The rename is atomic on POSIX filesystems, so readers see either the old
/// content or the new content and never a partial write.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = path.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation))))?;

    fs::rename(&tmp_path, path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation))))?;

    Ok(())
}

/// Where CLI input comes from: inline text, `@path`, or `-` for stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl InputSpec {
    pub fn parse(spec: &str) -> Result<InputSpec> {
        if spec.trim() == "-" {
            return Ok(InputSpec::Stdin);
        }

        if let Some(path) = spec.strip_prefix('@') {
            if path.trim().is_empty() {
                return Err(Error::validation_invalid_argument(
                    "input",
                    "Invalid input spec '@' (missing file path)",
                    None,
                    None,
                ));
            }
            return Ok(InputSpec::File(PathBuf::from(path)));
        }

        Ok(InputSpec::Inline(spec.to_string()))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSpec::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            InputSpec::Inline(text) => Ok(text.clone()),
            InputSpec::File(path) => read_file(path, &format!("read input file '{}'", path.display())),
            InputSpec::Stdin => {
                let mut stdin = std::io::stdin();
                if stdin.is_terminal() {
                    return Err(Error::validation_invalid_argument(
                        "input",
                        "Cannot read input from stdin when stdin is a TTY",
                        None,
                        None,
                    ));
                }
                let mut buf = String::new();
                stdin
                    .read_to_string(&mut buf)
                    .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
                Ok(buf)
            }
        }
    }
}
