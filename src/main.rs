//! The `forge` launcher binary.
//!
//! Resolves rc-file configuration and startup options, then either prints
//! the provenance report (`--explain_rc`), hands the synthesized argument
//! vector to the dispatcher named by `FORGE_DISPATCHER`, or prints the
//! vector for inspection when no dispatcher is configured.

use forge_launcher::error::exit_code;
use forge_launcher::{InvocationPlan, OptionProcessor, StartupOptions};
use std::env;
use std::path::Path;
use std::process::{self, Command};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd.to_string_lossy().into_owned(),
        Err(e) => {
            eprintln!("Error: cannot determine working directory: {}", e);
            process::exit(exit_code::INTERNAL_ERROR);
        }
    };
    let workspace = forge_launcher::workspace::find_workspace(Path::new(&cwd));

    let mut processor = OptionProcessor::new(StartupOptions::default());
    if let Err(e) = processor.parse_options(&args, &workspace, &cwd) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }

    if processor.startup_options().explain_rc {
        match InvocationPlan::from_processor(&processor).to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: cannot serialize invocation plan: {}", e);
                process::exit(exit_code::INTERNAL_ERROR);
            }
        }
        return;
    }

    if processor.command().is_empty() {
        eprintln!("No command given; try 'forge help'.");
        return;
    }

    match env::var("FORGE_DISPATCHER") {
        Ok(dispatcher) => dispatch(&dispatcher, &processor),
        Err(_) => {
            // Dry run: show what the dispatcher would have received.
            println!("{}", processor.command());
            for arg in processor.command_arguments() {
                println!("{}", arg);
            }
        }
    }
}

/// Run the dispatcher with the resolved command and argument vector,
/// forwarding its exit status.
fn dispatch(dispatcher: &str, processor: &OptionProcessor) -> ! {
    log::debug!(
        "dispatching '{}' with {} arguments via {}",
        processor.command(),
        processor.command_arguments().len(),
        dispatcher
    );
    match Command::new(dispatcher)
        .arg(processor.command())
        .args(processor.command_arguments())
        .status()
    {
        Ok(status) => process::exit(status.code().unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: cannot run dispatcher '{}': {}", dispatcher, e);
            process::exit(exit_code::INTERNAL_ERROR);
        }
    }
}
