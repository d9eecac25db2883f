//! Row progress logging for long conversions.

use palette_dither::ScanObserver;

/// Logs progress each time another `step_percent` of the rows is done.
#[derive(Debug)]
pub struct ProgressLog {
    step_percent: usize,
    next_percent: usize,
    reported: Vec<usize>,
}

impl ProgressLog {
    pub fn new(step_percent: usize) -> Self {
        let step_percent = step_percent.clamp(1, 100);
        Self {
            step_percent,
            next_percent: step_percent,
            reported: Vec::new(),
        }
    }

    /// Percentages logged so far.
    pub fn reported(&self) -> &[usize] {
        &self.reported
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ScanObserver for ProgressLog {
    fn on_row_complete(&mut self, rows_done: usize, rows_total: usize) {
        if rows_total == 0 {
            return;
        }
        let percent = rows_done * 100 / rows_total;
        if percent < self.next_percent {
            return;
        }
        // Report the highest threshold crossed, once
        let reached = percent - percent % self.step_percent;
        tracing::info!(percent = reached, rows_done, rows_total, "Dithering progress");
        self.reported.push(reached);
        self.next_percent = reached + self.step_percent;
    }
}
