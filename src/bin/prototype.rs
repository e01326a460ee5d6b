use std::process;

use colored::Colorize;
use pattern_demos::logger::{self, LogSink};
use pattern_demos::prototype::PrototypeHarness;
use pattern_demos::{DemoError, Settings};

fn run() -> Result<(), DemoError> {
    let settings = Settings::bundled()?;
    let log = logger::global();
    let report = PrototypeHarness::with_settings(log, settings.prototype).run()?;
    log.flush()?;

    println!("{}", report);
    println!(
        "{} report written to {}",
        "✓".green(),
        log.destination().display()
    );
    Ok(())
}

fn main() {
    println!("{}", "=== Prototype: clone vs copy ===".bold());

    if let Err(err) = run() {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}
