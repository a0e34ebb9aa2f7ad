//! Control loop driving input to motion, one fixed-cadence cycle at a time.
//!
//! ```text
//! Starting ──start()──► Running ──tick()──► tick() ──► ...
//!  (display startup,      (sample → edges → modifiers → repeat → advance,
//!   glyph at center)       then a fixed 100 ms sleep)
//! ```
//!
//! Each cycle runs to completion before the sleep; the sleep is the only suspension
//! point, so state has exactly one writer and needs no locking.

pub mod stats;

use std::time::Duration;

use statum::{machine, state};
use tracing::{debug, info};

use crate::display::{DisplayError, DisplaySurface, Glyph};
use crate::input::{DirectionSet, EdgeDetector, InputSampler, InputSnapshot};
use crate::motion::{
    modifier, CursorPosition, Modifiers, MotionController, MotionEvent, RepeatTimer,
};

use self::stats::LoopStats;

/// Fixed pause after every cycle
pub const CYCLE_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Display startup failed: {0}")]
    DisplayError(#[from] DisplayError),
}

/// Everything decided in one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub snapshot: InputSnapshot,
    pub edges: DirectionSet,
    pub modifiers: Modifiers,
    pub event: Option<MotionEvent>,
}

#[state]
#[derive(Debug, Clone)]
pub enum LoopState {
    Starting,
    Running,
}

#[machine]
pub struct ControlLoop<S: LoopState> {
    sampler: Box<dyn InputSampler>,
    surface: Box<dyn DisplaySurface>,
    edges: EdgeDetector,
    repeat: RepeatTimer,
    motion: MotionController,
    stats: LoopStats,
}

impl<S: LoopState> ControlLoop<S> {
    pub fn position(&self) -> CursorPosition {
        self.motion.position()
    }
}

impl ControlLoop<Starting> {
    pub fn create(sampler: Box<dyn InputSampler>, surface: Box<dyn DisplaySurface>) -> Self {
        let geometry = surface.geometry();
        debug!("Creating control loop for surface {:?}", geometry);

        Self::new(
            sampler,
            surface,
            EdgeDetector::new(),
            RepeatTimer::default(),
            MotionController::new(geometry, Glyph::default()),
            LoopStats::new(),
        )
    }

    /// Runs the display startup sequence and draws the glyph at the center
    pub fn start(mut self) -> Result<ControlLoop<Running>, ControlError> {
        info!("Starting display");
        self.surface.initialize()?;
        self.surface.clear();
        self.surface.set_backlight(true)?;

        self.motion.place(self.surface.as_mut());
        info!(
            "Glyph placed at {} within {:?}",
            self.motion.position(),
            self.motion.bounds()
        );

        info!("Control loop ready, transitioning to Running state");
        Ok(self.transition())
    }
}

impl ControlLoop<Running> {
    /// One strictly sequential cycle, without the trailing sleep
    pub fn tick(&mut self) -> CycleReport {
        let snapshot = self.sampler.sample();
        let edges = self.edges.detect(snapshot.directions);
        let modifiers = modifier::resolve(snapshot.buttons);
        // An edge move owns the cycle; repeat counting resumes on the next one
        let repeat = if edges.is_empty() {
            self.repeat.tick(snapshot.directions)
        } else {
            self.repeat.skip(snapshot.directions);
            None
        };

        let event = self.motion.advance(
            edges,
            repeat,
            modifiers.step,
            modifiers.recenter,
            self.surface.as_mut(),
        );
        if let Some(event) = &event {
            debug!("Motion: {:?}", event);
        }

        let report = CycleReport {
            snapshot,
            edges,
            modifiers,
            event,
        };
        self.stats.record(&report);
        report
    }

    /// Ticks forever at the fixed cadence
    pub async fn run(mut self) {
        info!(
            "Entering control loop with {} ms cycle",
            CYCLE_PERIOD.as_millis()
        );
        loop {
            self.tick();
            self.stats.log_if_due(self.motion.position());
            tokio::time::sleep(CYCLE_PERIOD).await;
        }
    }
}
