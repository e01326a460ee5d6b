use std::process;

use colored::Colorize;
use pattern_demos::logger::{self, LogSink};
use pattern_demos::{visitor, DemoError, Settings};

fn run() -> Result<(), DemoError> {
    let settings = Settings::bundled()?;
    let log = logger::global();
    let trace = visitor::run_demo(log, &settings.visitor, &mut rand::thread_rng())?;
    log.flush()?;

    print!("{}", trace);
    println!("{} trace written to {}", "✓".green(), log.destination().display());
    Ok(())
}

fn main() {
    println!("{}", "=== Visitor: fruit pricing ===".bold());

    if let Err(err) = run() {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}
