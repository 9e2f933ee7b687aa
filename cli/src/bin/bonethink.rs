//! bonethink - the same skeleton, thinking out loud

use std::process::ExitCode;

use bonesay_cli::Program;

#[tokio::main]
async fn main() -> ExitCode {
    bonesay_cli::main_for(Program::Think).await
}
