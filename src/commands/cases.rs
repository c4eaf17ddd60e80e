use clap::Args;
use serde::Serialize;

use keyconv::KeyCase;

use super::CmdResult;

#[derive(Args, Debug)]
pub struct CasesArgs {
    /// Key used to demonstrate each case
    #[arg(long, default_value = "exampleKey_name")]
    pub sample: String,
}

#[derive(Debug, Serialize)]
pub struct CaseInfo {
    pub name: KeyCase,
    pub example: String,
}

#[derive(Debug, Serialize)]
pub struct CasesOutput {
    pub sample: String,
    pub cases: Vec<CaseInfo>,
}

pub fn run(args: CasesArgs) -> CmdResult<CasesOutput> {
    let cases = KeyCase::ALL
        .iter()
        .map(|case| CaseInfo {
            name: *case,
            example: case.apply(&args.sample),
        })
        .collect();

    Ok((
        CasesOutput {
            sample: args.sample,
            cases,
        },
        0,
    ))
}
