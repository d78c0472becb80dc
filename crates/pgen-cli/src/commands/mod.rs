pub mod check;
pub mod dump;
pub mod error;
pub mod loader;
pub mod parse;
pub mod trace;


use self::error::CliError;

/// Print `error` to stderr and exit with its code.
pub fn fail(error: CliError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(error.exit_code());
}
