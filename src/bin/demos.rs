use std::process;

use colored::Colorize;
use pattern_demos::logger;
use pattern_demos::{run_all, DemoError, Settings};

fn run() -> Result<(), DemoError> {
    let settings = Settings::bundled()?;
    run_all(logger::global(), &settings, &mut rand::thread_rng())
}

fn main() {
    println!("{}", "=== All demos ===".bold());

    let log = logger::global();
    match run() {
        Ok(()) => {
            print!("{}", log.contents());
            println!(
                "{} all demos logged to {}",
                "✓".green(),
                log.destination().display()
            );
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            process::exit(1);
        }
    }
}
