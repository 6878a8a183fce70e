use log::warn;
use std::fmt;

/// A non-fatal problem found while grouping samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A sample with sequence data has no population assignment.
    /// It is only counted in `TOTAL`.
    MissingAssignment { sample: String },

    /// A sample in the population map has no sequence data.
    UnusedAssignment { sample: String, population: String },

    /// A sequence identifier was seen again and its sequence was replaced.
    DuplicateSample { sample: String },

    /// A sample was assigned twice and the later label was kept.
    DuplicateAssignment { sample: String, population: String },

    /// A sample was assigned to the reserved `TOTAL` label.
    ReservedPopulation { sample: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingAssignment { sample } => write!(
                f,
                "sample {} isn't in the population map; counted in {} only",
                sample,
                crate::TOTAL
            ),
            Self::UnusedAssignment { sample, population } => write!(
                f,
                "sample {} (population {}) found in the population map has no data",
                sample, population
            ),
            Self::DuplicateSample { sample } => write!(
                f,
                "sequence identifier {} appears more than once; keeping the last sequence",
                sample
            ),
            Self::DuplicateAssignment { sample, population } => write!(
                f,
                "sample {} is assigned more than once; keeping population {}",
                sample, population
            ),
            Self::ReservedPopulation { sample } => write!(
                f,
                "sample {} is assigned to the reserved population {}; assignment ignored",
                sample,
                crate::TOTAL
            ),
        }
    }
}

/// Receives diagnostics from the grouping and parsing steps.
///
/// Collect them with a `Vec<Diagnostic>`, or forward them to the
/// logger with `LogReporter`.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Emits every diagnostic as a `warn!` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
    }
}
