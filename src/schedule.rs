//! Frame scheduling primitives.
//!
//! The window event loop asks for one frame per display refresh; everything
//! that animates only sees a [`FrameInput`]. Time comes from a
//! [`FrameClock`] so that frames can also be stepped deterministically with
//! [`run_frames`], and a [`StopSignal`] ends the loop cooperatively.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use instant::{Duration, Instant};

/// Cloneable cancellation flag checked before every frame.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Time since the clock started.
pub trait FrameClock {
    fn elapsed(&mut self) -> Duration;
}

/// Monotonic wall time.
#[derive(Debug, Clone)]
pub struct SteadyClock {
    start: Instant,
}

impl SteadyClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SteadyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SteadyClock {
    fn elapsed(&mut self) -> Duration {
        self.start.elapsed()
    }
}

/// Advances by a fixed step every time it is read.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: Duration,
    now: Duration,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            now: Duration::ZERO,
        }
    }

    /// A 60 Hz display.
    pub fn sixty_hertz() -> Self {
        Self::new(Duration::from_micros(16_667))
    }
}

impl FrameClock for FixedStepClock {
    fn elapsed(&mut self) -> Duration {
        self.now += self.step;
        self.now
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Zero-based number of the frame.
    pub index: u64,
    /// Time since the first clock reading.
    pub elapsed: Duration,
    /// Time since the previous frame.
    pub dt: Duration,
}

impl FrameInput {
    pub fn seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// Turns clock readings into consecutive [`FrameInput`]s.
#[derive(Debug, Clone)]
pub struct FrameTicker<C> {
    clock: C,
    last: Option<Duration>,
    index: u64,
}

impl<C: FrameClock> FrameTicker<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: None,
            index: 0,
        }
    }

    pub fn tick(&mut self) -> FrameInput {
        let elapsed = self.clock.elapsed();
        let dt = self
            .last
            .map(|last| elapsed.saturating_sub(last))
            .unwrap_or(Duration::ZERO);
        let frame = FrameInput {
            index: self.index,
            elapsed,
            dt,
        };
        self.last = Some(elapsed);
        self.index += 1;
        frame
    }
}

/// Anything that changes from one frame to the next.
pub trait Animate {
    fn advance(&mut self, frame: &FrameInput);
}

/// Step `state` until `stop` is raised or `max_frames` frames have run.
///
/// Returns the number of frames that were advanced.
pub fn run_frames<A, C>(state: &mut A, clock: C, stop: &StopSignal, max_frames: Option<usize>) -> usize
where
    A: Animate + ?Sized,
    C: FrameClock,
{
    let mut ticker = FrameTicker::new(clock);
    let mut frames = 0;
    while !stop.is_stopped() && max_frames.is_none_or(|max| frames < max) {
        let frame = ticker.tick();
        state.advance(&frame);
        frames += 1;
    }
    frames
}
