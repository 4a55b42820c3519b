use std::process::ExitCode;

fn main() -> ExitCode {
    custdir_cli::run()
}
