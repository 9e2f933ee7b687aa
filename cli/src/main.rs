//! bonesay - a skeleton that speaks
//!
//! ```bash
//! bonesay hello
//! echo hello | bonesay -f cat --rainbow
//! bonesay --super "long live the bones"
//! RUST_LOG=debug bonesay -l
//! ```

use std::process::ExitCode;

use bonesay_cli::Program;

#[tokio::main]
async fn main() -> ExitCode {
    bonesay_cli::main_for(Program::Say).await
}
