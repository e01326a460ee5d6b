use std::fmt;
use std::ptr;
use std::time::{Duration, Instant};

use crate::error::DemoError;
use crate::logger::{LogSink, SEPARATOR};
use crate::prototype::{Book, Prototype, Strategy};
use crate::settings::HarnessSettings;

// =============================================================================
// Harness states
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    Idle,
    Constructed,
    Cloned,
    Copied,
    Verified,
    Reported,
    Done,
    Failed,
}

impl HarnessState {
    fn can_advance_to(self, next: HarnessState) -> bool {
        use HarnessState::*;
        matches!(
            (self, next),
            (Idle, Constructed)
                | (Constructed, Cloned)
                | (Cloned, Copied)
                | (Copied, Verified)
                | (Verified, Reported)
                | (Reported, Done)
        ) || (next == Failed && !matches!(self, Done | Failed))
    }
}

impl fmt::Display for HarnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HarnessState::Idle => "Idle",
            HarnessState::Constructed => "Constructed",
            HarnessState::Cloned => "Cloned",
            HarnessState::Copied => "Copied",
            HarnessState::Verified => "Verified",
            HarnessState::Reported => "Reported",
            HarnessState::Done => "Done",
            HarnessState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Per-strategy result and report
// =============================================================================

#[derive(Debug)]
pub struct DuplicationResult {
    pub strategy: Strategy,
    pub elapsed: Duration,
    pub produced: Book,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub title: String,
    pub topic: String,
}

impl Snapshot {
    fn of(book: &Book) -> Self {
        Snapshot {
            title: book.title().to_string(),
            topic: book.topic().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub timings: [(Strategy, Duration); 2],
    pub clone_is_original: bool,
    pub copy_is_original: bool,
    pub clone_title_matches: bool,
    pub copy_title_matches: bool,
    pub clone_shares_storage: bool,
    pub copy_shares_storage: bool,
    pub original: Snapshot,
    pub clone: Snapshot,
    pub copy: Snapshot,
}

impl Report {
    fn new(original: &Book, clone: &DuplicationResult, copy: &DuplicationResult) -> Self {
        Report {
            timings: [
                (clone.strategy, clone.elapsed),
                (copy.strategy, copy.elapsed),
            ],
            clone_is_original: ptr::eq(original, &clone.produced),
            copy_is_original: ptr::eq(original, &copy.produced),
            clone_title_matches: original.title() == clone.produced.title(),
            copy_title_matches: original.title() == copy.produced.title(),
            clone_shares_storage: original.shares_storage_with(&clone.produced),
            copy_shares_storage: original.shares_storage_with(&copy.produced),
            original: Snapshot::of(original),
            clone: Snapshot::of(&clone.produced),
            copy: Snapshot::of(&copy.produced),
        }
    }

    pub fn elapsed(&self, strategy: Strategy) -> Option<Duration> {
        self.timings
            .iter()
            .find(|(s, _)| *s == strategy)
            .map(|(_, elapsed)| *elapsed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PROTOTYPE")?;
        writeln!(f)?;
        writeln!(f, "Copy vs clone timing and correctness checking")?;
        writeln!(f, "TIME SUMMARY:")?;
        for (strategy, elapsed) in &self.timings {
            writeln!(f, "{} time: {}ns", strategy, elapsed.as_nanos())?;
        }

        writeln!(f)?;
        writeln!(f, "OBJECTS SUMMARY:")?;
        writeln!(f, "original == clone: {}", self.clone_is_original)?;
        writeln!(f, "original == copy: {}", self.copy_is_original)?;

        writeln!(f)?;
        writeln!(f, "original.title == clone.title: {}", self.clone_title_matches)?;
        writeln!(f, "original.title == copy.title: {}", self.copy_title_matches)?;
        writeln!(f, "original shares storage with clone: {}", self.clone_shares_storage)?;
        writeln!(f, "original shares storage with copy: {}", self.copy_shares_storage)?;

        writeln!(f)?;
        for (label, snapshot) in [
            ("Original", &self.original),
            ("Clone", &self.clone),
            ("Copy", &self.copy),
        ] {
            writeln!(
                f,
                "{} title: {}, {} topic: {}",
                label,
                snapshot.title,
                label.to_lowercase(),
                snapshot.topic
            )?;
        }
        writeln!(f, "{}", SEPARATOR)
    }
}

// =============================================================================
// Verification
// =============================================================================

/// Checks identity, equality and independence, renaming and tagging `clone`
/// along the way.
pub fn verify(
    original: &Book,
    clone: &mut Book,
    copy: &Book,
    renamed_title: &str,
) -> Result<(), DemoError> {
    ensure(!ptr::eq(original, clone), "clone is the original instance")?;
    ensure(!ptr::eq(original, copy), "copy is the original instance")?;
    ensure(original == clone, "clone differs from the original")?;
    ensure(original == copy, "copy differs from the original")?;
    ensure(
        !original.shares_storage_with(clone),
        "clone shares storage with the original",
    )?;
    ensure(
        !original.shares_storage_with(copy),
        "copy shares storage with the original",
    )?;

    let title_before = original.title().to_string();
    let tags_before = original.tags().len();

    clone
        .set_title(renamed_title)
        .map_err(|err| DemoError::assertion(format!("clone could not be renamed: {}", err)))?;
    clone.add_tag("clone");

    ensure(clone.title() == renamed_title, "clone was not renamed")?;
    ensure(
        original.title() == title_before,
        "renaming the clone changed the original",
    )?;
    ensure(
        copy.title() == title_before,
        "renaming the clone changed the copy",
    )?;
    ensure(
        original.tags().len() == tags_before && copy.tags() == original.tags(),
        "tagging the clone changed another instance",
    )
}

fn ensure(condition: bool, message: &str) -> Result<(), DemoError> {
    if condition {
        Ok(())
    } else {
        Err(DemoError::assertion(message))
    }
}

/// Samples the clock right around `duplicate` and nothing else.
fn measure<F>(strategy: Strategy, duplicate: F) -> Result<DuplicationResult, DemoError>
where
    F: FnOnce() -> Result<Book, DemoError>,
{
    let start = Instant::now();
    let produced = duplicate();
    let elapsed = start.elapsed();

    Ok(DuplicationResult {
        strategy,
        elapsed,
        produced: produced?,
    })
}

// =============================================================================
// Harness
// =============================================================================

/// Runs one clone-versus-copy comparison and appends the report to `sink`.
pub struct PrototypeHarness<'a, L: LogSink + ?Sized> {
    sink: &'a L,
    settings: HarnessSettings,
    state: HarnessState,
    history: Vec<HarnessState>,
}

impl<'a, L: LogSink + ?Sized> PrototypeHarness<'a, L> {
    pub fn new(sink: &'a L) -> Self {
        Self::with_settings(sink, HarnessSettings::default())
    }

    pub fn with_settings(sink: &'a L, settings: HarnessSettings) -> Self {
        PrototypeHarness {
            sink,
            settings,
            state: HarnessState::Idle,
            history: vec![HarnessState::Idle],
        }
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Every state visited so far, starting with `Idle`.
    pub fn history(&self) -> &[HarnessState] {
        &self.history
    }

    pub fn run(&mut self) -> Result<Report, DemoError> {
        if self.state != HarnessState::Idle {
            return Err(DemoError::invalid_state(self.state.to_string()));
        }

        self.execute().map_err(|err| {
            self.advance(HarnessState::Failed);
            err
        })
    }

    fn execute(&mut self) -> Result<Report, DemoError> {
        let original = Book::new(&self.settings.title, &self.settings.topic)?;
        self.advance(HarnessState::Constructed);

        let mut clone = measure(Strategy::Clone, || Ok(original.duplicate_via_clone()))?;
        self.advance(HarnessState::Cloned);

        let copy = measure(Strategy::Copy, || original.duplicate_via_copy())?;
        self.advance(HarnessState::Copied);

        verify(
            &original,
            &mut clone.produced,
            &copy.produced,
            &self.settings.renamed_title,
        )?;
        self.advance(HarnessState::Verified);

        let report = Report::new(&original, &clone, &copy);
        self.advance(HarnessState::Reported);

        self.sink.append(&report.to_string());
        self.advance(HarnessState::Done);

        Ok(report)
    }

    fn advance(&mut self, next: HarnessState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        self.state = next;
        self.history.push(next);
    }
}
