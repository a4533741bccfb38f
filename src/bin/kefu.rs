use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Console front end for kefu dialogue scripts.
#[derive(Parser)]
#[command(name = "kefu")]
#[command(about = "Run a kefu dialogue script interactively", version)]
struct Cli {
    /// Script file (UTF-8)
    script: PathBuf,

    /// Initial account balance
    #[arg(short, long, default_value_t = 0.0)]
    balance: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.script) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("cannot read {}: {error}", cli.script.display());
            return ExitCode::FAILURE;
        }
    };

    let mut session = match kefu::build(&source, cli.balance) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("{}: {error}", cli.script.display());
            return ExitCode::FAILURE;
        }
    };

    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
