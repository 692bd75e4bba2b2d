use std::time::Duration;

use folio3d::schedule::{
    Animate, FixedStepClock, FrameInput, FrameTicker, StopSignal, run_frames,
};

#[derive(Default)]
struct Recorder {
    frames: Vec<FrameInput>,
    stop_after: Option<(usize, StopSignal)>,
}

impl Animate for Recorder {
    fn advance(&mut self, frame: &FrameInput) {
        self.frames.push(*frame);
        if let Some((after, stop)) = &self.stop_after {
            if self.frames.len() == *after {
                stop.stop();
            }
        }
    }
}

#[test]
fn first_frame_has_no_delta() {
    let mut ticker = FrameTicker::new(FixedStepClock::new(Duration::from_millis(10)));

    let first = ticker.tick();
    let second = ticker.tick();

    assert_eq!(first.index, 0);
    assert_eq!(first.dt, Duration::ZERO);
    assert_eq!(second.index, 1);
    assert_eq!(second.dt, Duration::from_millis(10));
    assert_eq!(second.elapsed, Duration::from_millis(20));
}

#[test]
fn frame_seconds_follow_the_clock() {
    let mut ticker = FrameTicker::new(FixedStepClock::new(Duration::from_millis(500)));
    ticker.tick();
    let frame = ticker.tick();
    assert!((frame.seconds() - 1.0).abs() < 1e-6);
}

#[test]
fn run_frames_honours_the_frame_limit() {
    let mut recorder = Recorder::default();
    let frames = run_frames(
        &mut recorder,
        FixedStepClock::sixty_hertz(),
        &StopSignal::new(),
        Some(5),
    );
    assert_eq!(frames, 5);
    let indices: Vec<u64> = recorder.frames.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn stop_signal_ends_an_unbounded_loop() {
    let stop = StopSignal::new();
    let mut recorder = Recorder {
        stop_after: Some((7, stop.clone())),
        ..Recorder::default()
    };

    let frames = run_frames(&mut recorder, FixedStepClock::sixty_hertz(), &stop, None);

    assert_eq!(frames, 7);
    assert!(stop.is_stopped());
}
