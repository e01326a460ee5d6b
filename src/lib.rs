//! Classic design-pattern demos that each write a trace to a shared log.
//!
//! - [`prototype`]: clone-versus-copy comparison harness
//! - [`injection`]: constructor injection of a session into a user
//! - [`visitor`]: double dispatch over a basket of fruit
//! - [`logger`]: the process-wide append-only log

pub mod error;
pub mod injection;
pub mod logger;
pub mod prototype;
pub mod settings;
pub mod visitor;

pub use error::DemoError;
pub use logger::{LogSink, MemoryLog, SharedLog};
pub use settings::Settings;

use rand::Rng;

use prototype::PrototypeHarness;

/// Runs every demo against one sink and flushes it once at the end.
pub fn run_all<L, R>(sink: &L, settings: &Settings, rng: &mut R) -> Result<(), DemoError>
where
    L: LogSink + ?Sized,
    R: Rng,
{
    injection::run_demo(sink)?;
    PrototypeHarness::with_settings(sink, settings.prototype.clone()).run()?;
    visitor::run_demo(sink, &settings.visitor, rng)?;
    sink.flush()
}
