//! Terminal progress bars for network builds.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use smallworld_network::{ProgressObserver, ProgressReport, Stage};

const TEMPLATE: &str = "  {prefix:>24} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) ETA {eta}";

/// One bar per build stage, stacked as stages start.
pub struct BarProgress {
    multi: MultiProgress,
    style: ProgressStyle,
    bars: Vec<(Stage, ProgressBar)>,
}

impl BarProgress {
    /// Draw to stderr.
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn with_target(target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        Self {
            multi: MultiProgress::with_draw_target(target),
            style,
            bars: Vec::new(),
        }
    }

    fn bar_for(&mut self, stage: Stage, total: usize) -> &ProgressBar {
        let fresh = self.bars.last().map_or(true, |(current, _)| *current != stage);
        if fresh {
            if let Some((_, previous)) = self.bars.last() {
                if !previous.is_finished() {
                    previous.finish();
                }
            }
            let bar = self.multi.add(ProgressBar::new(total as u64));
            bar.set_style(self.style.clone());
            bar.set_prefix(stage.to_string());
            self.bars.push((stage, bar));
        }
        // A bar was pushed above if none existed
        &self.bars[self.bars.len() - 1].1
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for BarProgress {
    fn on_progress(&mut self, report: &ProgressReport) {
        let bar = self.bar_for(report.stage, report.total);
        bar.set_length(report.total as u64);
        bar.set_position(report.completed as u64);
        if report.completed >= report.total {
            bar.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(stage: Stage, completed: usize, total: usize) -> ProgressReport {
        ProgressReport { stage, completed, total }
    }

    fn hidden() -> BarProgress {
        BarProgress::with_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn bar_follows_reports() {
        let mut bars = hidden();
        bars.on_progress(&report(Stage::Lattice, 40, 100));

        let (stage, bar) = &bars.bars[0];
        assert_eq!(*stage, Stage::Lattice);
        assert_eq!(bar.position(), 40);
        assert!(!bar.is_finished());

        bars.on_progress(&report(Stage::Lattice, 100, 100));
        assert_eq!(bars.bars.len(), 1);
        assert!(bars.bars[0].1.is_finished());
    }

    #[test]
    fn each_stage_gets_its_own_bar() {
        let mut bars = hidden();
        bars.on_progress(&report(Stage::Lattice, 10, 100));
        bars.on_progress(&report(Stage::DistanceBiased { pass: 0 }, 5, 50));
        bars.on_progress(&report(Stage::DistanceBiased { pass: 1 }, 50, 50));

        let stages: Vec<Stage> = bars.bars.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            stages,
            vec![
                Stage::Lattice,
                Stage::DistanceBiased { pass: 0 },
                Stage::DistanceBiased { pass: 1 },
            ]
        );
        // Starting a new stage closes the previous bar
        assert!(bars.bars.iter().all(|(_, bar)| bar.is_finished()));
    }
}
