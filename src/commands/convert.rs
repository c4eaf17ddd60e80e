use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use keyconv::document::{self, Document, Format};
use keyconv::io::InputSpec;
use keyconv::{ConvertSettings, KeyCase};

use super::CmdResult;

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input document (inline text, @file, or - for stdin)
    pub spec: String,

    /// Key case to apply (run `keyconv cases` to list them)
    #[arg(long, short)]
    pub case: Option<String>,

    /// Only convert top-level keys (and keys of top-level array elements)
    #[arg(long)]
    pub shallow: bool,

    /// Input format: json, yaml, or toml (default: from @file extension, else json)
    #[arg(long, short)]
    pub format: Option<String>,

    /// Output format (default: from --output extension, else the input format)
    #[arg(long, value_name = "FORMAT")]
    pub to: Option<String>,

    /// Write the converted document to PATH
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Settings file (json, yaml, or toml) with case/deepTransform/format defaults
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Print the rendered document instead of the JSON response
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOutput {
    pub case: KeyCase,
    pub deep_transform: bool,
    pub input_format: Format,
    pub output_format: Format,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<Value>,
}

struct Conversion {
    output: ConvertOutput,
    document: Document,
}

fn parse_format_flag(raw: Option<&str>) -> keyconv::Result<Option<Format>> {
    raw.map(str::parse::<Format>).transpose()
}

fn execute(args: &ConvertArgs) -> keyconv::Result<Conversion> {
    let input = InputSpec::parse(&args.spec)?;
    let case = args.case.as_deref().map(str::parse::<KeyCase>).transpose()?;
    let format = parse_format_flag(args.format.as_deref())?;

    let settings = match &args.settings {
        Some(path) => ConvertSettings::load(path)?,
        None => ConvertSettings::default(),
    }
    .merge(case, args.shallow, format);

    let converter = settings.converter()?;
    let input_format = settings
        .format
        .or_else(|| input.path().and_then(Format::from_path))
        .unwrap_or(Format::Json);
    let output_format = parse_format_flag(args.to.as_deref())?
        .or_else(|| args.output.as_deref().and_then(Format::from_path))
        .unwrap_or(input_format);

    let text = input.read()?;
    let document = document::convert_document(&text, input_format, &converter)?;

    let output_path = match &args.output {
        Some(path) => {
            document::write_document(path, &document, output_format)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    let output = ConvertOutput {
        case: *converter.transformer(),
        deep_transform: converter.is_deep(),
        input_format,
        output_format,
        converted: if output_path.is_none() {
            Some(document.as_value().into_owned())
        } else {
            None
        },
        output_path,
    };

    Ok(Conversion { output, document })
}

pub fn run(args: ConvertArgs) -> CmdResult<ConvertOutput> {
    let conversion = execute(&args)?;
    Ok((conversion.output, 0))
}

/// Raw mode prints the rendered document, or nothing when it went to a file.
pub fn run_raw(args: ConvertArgs) -> keyconv::Result<(String, i32)> {
    let conversion = execute(&args)?;
    if conversion.output.output_path.is_some() {
        return Ok((String::new(), 0));
    }

    let rendered = document::render(&conversion.document, conversion.output.output_format)?;
    Ok((rendered, 0))
}
