use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = gh_sponsors::run(std::env::args()) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
