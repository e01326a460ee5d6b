//! Prototype pattern: two ways to duplicate a [`Book`] and a harness that
//! times and checks both.

mod book;
mod harness;

use std::fmt;

use crate::error::DemoError;

pub use book::Book;
pub use harness::{verify, DuplicationResult, HarnessState, PrototypeHarness, Report, Snapshot};

/// Explicit duplication, implemented field by field by each entity.
pub trait Prototype: Sized {
    /// Structural duplicate built without going through the constructor.
    fn duplicate_via_clone(&self) -> Self;

    /// Rebuilds the entity through its public constructor.
    fn duplicate_via_copy(&self) -> Result<Self, DemoError>;

    fn duplicate(&self, strategy: Strategy) -> Result<Self, DemoError> {
        match strategy {
            Strategy::Clone => Ok(self.duplicate_via_clone()),
            Strategy::Copy => self.duplicate_via_copy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Clone,
    Copy,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Clone, Strategy::Copy];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Clone => "Clone",
            Strategy::Copy => "Copy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
