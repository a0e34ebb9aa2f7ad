use chrono::{DateTime, Duration, Local};
use tracing::info;

use super::CycleReport;
use crate::motion::{CursorPosition, MotionEvent, MoveTrigger};

/// Counters since the last stats line
#[derive(Debug, Clone)]
pub struct LoopStats {
    cycles: u64,
    edge_moves: u64,
    repeat_moves: u64,
    recenters: u64,
    last_log_time: DateTime<Local>,
    log_interval: Duration,
}

impl LoopStats {
    pub fn new() -> Self {
        Self {
            cycles: 0,
            edge_moves: 0,
            repeat_moves: 0,
            recenters: 0,
            last_log_time: Local::now(),
            log_interval: Duration::seconds(30),
        }
    }

    pub fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        match report.event {
            Some(MotionEvent::Moved {
                trigger: MoveTrigger::Edge,
                ..
            }) => self.edge_moves += 1,
            Some(MotionEvent::Moved {
                trigger: MoveTrigger::Repeat,
                ..
            }) => self.repeat_moves += 1,
            Some(MotionEvent::Recentered { .. }) => self.recenters += 1,
            None => {}
        }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn moves(&self) -> u64 {
        self.edge_moves + self.repeat_moves
    }

    /// Logs and resets the counters once the interval has passed
    pub fn log_if_due(&mut self, position: CursorPosition) {
        let now = Local::now();
        if now - self.last_log_time <= self.log_interval {
            return;
        }

        let elapsed_seconds = (now - self.last_log_time).num_seconds().max(1);
        info!(
            "Loop stats: {} cycles in {} s ({:.2}/s), glyph at {}",
            self.cycles,
            elapsed_seconds,
            self.cycles as f64 / elapsed_seconds as f64,
            position
        );
        info!(
            "Moves: {} edge, {} repeat, {} recenters",
            self.edge_moves, self.repeat_moves, self.recenters
        );

        self.cycles = 0;
        self.edge_moves = 0;
        self.repeat_moves = 0;
        self.recenters = 0;
        self.last_log_time = now;
    }
}

impl Default for LoopStats {
    fn default() -> Self {
        Self::new()
    }
}
