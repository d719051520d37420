use std::process::ExitCode;

fn main() -> ExitCode {
    tienda_cli::run()
}
