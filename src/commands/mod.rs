pub type CmdResult<T> = keyconv::Result<(T, i32)>;

pub mod cases;
pub mod convert;

pub(crate) fn run_raw(command: crate::Commands) -> keyconv::Result<(String, i32)> {
    match command {
        crate::Commands::Convert(args) => convert::run_raw(args),
        _ => Err(keyconv::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (keyconv::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Convert(args) => dispatch!(args, convert),
        crate::Commands::Cases(args) => dispatch!(args, cases),
    }
}
