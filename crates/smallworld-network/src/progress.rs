//! Progress reporting for long builds.
//!
//! Build loops own a [`ProgressMeter`] and tick it once per unit of work.
//! The meter forwards a [`ProgressReport`] to the caller's
//! [`ProgressObserver`] at most [`CHECKPOINTS`] times per loop, plus once
//! when the loop completes.

use tracing::debug;

/// Maximum number of reports per loop.
pub const CHECKPOINTS: usize = 1000;

/// Which part of the build is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Instantiating nodes and pruning by density
    Lattice,
    /// Distance-biased attachment, with the zero-based pass
    DistanceBiased { pass: usize },
    /// Degree-biased attachment, with the zero-based pass
    DegreeBiased { pass: usize },
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lattice => write!(f, "lattice"),
            Self::DistanceBiased { pass } => write!(f, "distance-biased pass {}", pass + 1),
            Self::DegreeBiased { pass } => write!(f, "degree-biased pass {}", pass + 1),
        }
    }
}

/// A snapshot of loop progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub stage: Stage,
    pub completed: usize,
    pub total: usize,
}

impl ProgressReport {
    /// Completion in whole percent.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            100 * self.completed / self.total
        }
    }
}

/// Receives progress reports.
pub trait ProgressObserver {
    fn on_progress(&mut self, report: &ProgressReport);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ProgressReport),
{
    fn on_progress(&mut self, report: &ProgressReport) {
        self(report)
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _report: &ProgressReport) {}
}

/// Writes reports to the `debug` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, report: &ProgressReport) {
        debug!(
            "{}: {:3}% completed ({}/{})",
            report.stage,
            report.percent(),
            report.completed,
            report.total
        );
    }
}

/// Counts work units and reports at a bounded cadence.
pub(crate) struct ProgressMeter<'a> {
    observer: &'a mut dyn ProgressObserver,
    stage: Stage,
    total: usize,
    increment: usize,
    counter: usize,
}

impl<'a> ProgressMeter<'a> {
    pub(crate) fn new(observer: &'a mut dyn ProgressObserver, stage: Stage, total: usize) -> Self {
        Self {
            observer,
            stage,
            total,
            increment: (total / CHECKPOINTS).max(1),
            counter: 0,
        }
    }

    /// Record one completed unit.
    pub(crate) fn tick(&mut self) {
        self.counter += 1;
        if self.counter % self.increment == 0 && self.counter < self.total {
            self.emit();
        }
    }

    /// Report completion.
    pub(crate) fn finish(mut self) {
        self.counter = self.total;
        self.emit();
    }

    fn emit(&mut self) {
        let report = ProgressReport {
            stage: self.stage,
            completed: self.counter,
            total: self.total,
        };
        self.observer.on_progress(&report);
    }
}
