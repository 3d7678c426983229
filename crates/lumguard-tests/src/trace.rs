//! Golden control traces.
//!
//! Fixed event sequences through the gain controller with hand-computed
//! expected gains. Each row is one tick at dt = 0.5 s with the default
//! configuration and a [0.2, 1.6] display range.

use lumguard_control::{BrightnessState, CuePlayer, GainController, InputEvents};
use lumguard_core::{Config, Cue, CueError, GainBounds, ImageSample};

#[derive(Default)]
struct CueLog(Vec<Cue>);

impl CuePlayer for CueLog {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        self.0.push(cue);
        Ok(())
    }
}

fn replay(start: f32, rows: &[(InputEvents, Option<ImageSample>, f32)]) -> (BrightnessState, Vec<Cue>) {
    let controller = GainController::new(Config::default(), GainBounds::new(0.2, 1.6));
    let mut state = BrightnessState::new(start);
    let mut cues = CueLog::default();

    for (i, (events, image, expected)) in rows.iter().enumerate() {
        let gain = controller.tick(&mut state, 0.5, image.as_ref(), events, &mut cues);
        assert!((gain - expected).abs() < 1e-5, "tick {i}: {gain} != {expected}");
    }
    (state, cues.0)
}

#[test]
fn test_panic_toggle_hold_trace() {
    let none = InputEvents::NONE;
    let rows = [
        (InputEvents::activate(), None, 0.5),
        (InputEvents::activate(), None, 0.25),
        (InputEvents::activate(), None, 0.2),
        (InputEvents::toggle_reset(), None, 0.325),
        (none, None, 0.45),
        (InputEvents::toggle_reset(), None, 0.45),
        (InputEvents::hold_reset(true), None, 0.575),
        (none, None, 0.7),
        (InputEvents::hold_reset(false), None, 0.7),
        (InputEvents::hold_reset(true), None, 0.825),
        (none, None, 0.95),
        (none, None, 1.0),
        (none, None, 1.0),
    ];
    let (state, cues) = replay(1.0, &rows);

    assert!(state.is_idle());
    use Cue::*;
    assert_eq!(cues, vec![Activate, Activate, Activate, Reset, Reset, Reset]);
}

#[test]
fn test_auto_trace() {
    let none = InputEvents::NONE;
    let bright = Some(ImageSample::with_rate(0.8, 0.0));
    let dark = Some(ImageSample::with_rate(0.2, -1.2));
    let rows = [
        // Static cap 0.5 / 0.8.
        (none, Some(ImageSample::first(0.8)), 0.625),
        // Held: recovery target 0.575 is below the current gain.
        (none, bright, 0.625),
        // Dark: climb at 0.125 per tick to the 1.0 baseline.
        (none, dark, 0.75),
        (none, dark, 0.875),
        (none, dark, 1.0),
        (none, dark, 1.0),
    ];
    let (state, cues) = replay(1.0, &rows);
    assert_eq!(state.auto_initial_gain, None);
    assert_eq!(cues, vec![Cue::AutoActivate]);
}

#[test]
fn test_panic_during_auto_trace() {
    let none = InputEvents::NONE;
    let bright = Some(ImageSample::with_rate(0.8, 0.0));
    let rows = [
        (none, Some(ImageSample::first(0.8)), 0.625),
        // Panic records the auto-dimmed gain and drops the auto baseline.
        (InputEvents::activate(), bright, 0.3125),
        // Auto is capped by the manual baseline and stays out of the way.
        (none, bright, 0.3125),
        (InputEvents::toggle_reset(), bright, 0.4375),
        (none, bright, 0.5625),
        (none, bright, 0.625),
        (none, bright, 0.625),
    ];
    let (state, cues) = replay(1.0, &rows);
    assert!(state.is_idle());
    assert_eq!(cues, vec![Cue::AutoActivate, Cue::Activate, Cue::Reset]);
}
