//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use daytrip_cli::CliError;

fn main() {
    daytrip_cli::init_logging();
    if let Err(err) = daytrip_cli::run() {
        if let CliError::ArgumentParsing(parse_error) = &err {
            parse_error.exit();
        }
        report(&err);
        std::process::exit(1);
    }
}

#[expect(clippy::print_stderr, reason = "the failure is the program's final output")]
fn report(err: &CliError) {
    eprintln!("daytrip: {err}");
}
