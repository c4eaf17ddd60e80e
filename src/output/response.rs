//! The JSON envelope printed for every non-raw command.

use std::io::{self, Write};

use keyconv::error::Hint;
use keyconv::{Error, ErrorCode, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody<'a>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: &'a str,
    details: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    hints: Option<&'a [Hint]>,
}

impl<'a> Envelope<'a> {
    fn of(result: &'a Result<Value>) -> Self {
        match result {
            Ok(data) => Envelope {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => Envelope {
                success: false,
                data: None,
                error: Some(ErrorBody {
                    code: err.code.as_str(),
                    message: &err.message,
                    details: &err.details,
                    hints: (!err.hints.is_empty()).then_some(err.hints.as_slice()),
                }),
            },
        }
    }
}

fn write_envelope<W: Write>(out: &mut W, result: &Result<Value>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &Envelope::of(result))?;
    writeln!(out)
}

/// Print the envelope to stdout. A closed pipe is not an error.
pub fn print_result(result: &Result<Value>) -> Result<()> {
    let stdout = io::stdout();
    match write_envelope(&mut stdout.lock(), result) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
        _ => Ok(()),
    }
}

/// Serialize command output and pair it with the process exit code.
pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<Value>, i32) {
    let result = result.and_then(|(data, exit_code)| {
        serde_json::to_value(data)
            .map(|value| (value, exit_code))
            .map_err(|e| Error::internal_json(e.to_string(), Some("serialize output".to_string())))
    });

    match result {
        Ok((value, exit_code)) => (Ok(value), exit_code),
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

/// Internal failures exit 1; anything the caller can fix exits 2.
pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InternalIoError | ErrorCode::InternalJsonError => 1,
        _ => 2,
    }
}
