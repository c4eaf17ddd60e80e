use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

mod commands;
mod output;
mod tty;

use commands::{cases, convert};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "keyconv")]
#[command(version = VERSION)]
#[command(about = "Convert the keys of nested JSON, YAML, and TOML documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the keys of a document
    Convert(convert::ConvertArgs),
    /// List available key cases
    Cases(cases::CasesArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Convert(args) if args.raw => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if let ResponseMode::Raw = response_mode(&cli.command) {
        return match commands::run_raw(cli.command) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let exit_code = output::exit_code_for_error(err.code);
                if output::print_result(&Err(err)).is_err() {
                    return std::process::ExitCode::FAILURE;
                }
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        };
    }

    tty::status("keyconv is working...");

    let (json_result, exit_code) = commands::run_json(cli.command);
    if output::print_result(&json_result).is_err() {
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
