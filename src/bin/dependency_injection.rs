use std::process;

use colored::Colorize;
use pattern_demos::injection;
use pattern_demos::logger::{self, LogSink};
use pattern_demos::DemoError;

fn run() -> Result<(), DemoError> {
    let log = logger::global();
    let trace = injection::run_demo(log)?;
    log.flush()?;

    print!("{}", trace);
    println!("{} trace written to {}", "✓".green(), log.destination().display());
    Ok(())
}

fn main() {
    println!("{}", "=== Dependency Injection ===".bold());

    if let Err(err) = run() {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}
