use std::process::ExitCode;

fn main() -> ExitCode {
    provconf_cli::run()
}
