//! Simulated headset runtime.
//!
//! [`SimulatedHmd`] plays the part of the VR runtime for one scenario: a
//! settings store holding analog gain, scripted digital actions, an audio
//! cue log and a quit signal. [`SceneFrames`] renders the scenario's scene
//! timeline into per-eye 16-bit frames.
//!
//! Both read time from a [`Clock`] shared with the scheduler, so under a
//! [`VirtualClock`](lumguard_control::VirtualClock) a twelve second
//! scenario runs instantly.

use lumguard_control::{Clock, CuePlayer, GainDevice, InputSource, QuitSignal};
use lumguard_core::{
    ActionId, ActionState, Config, Cue, CueError, DeviceError, Eye, GainBounds, GraphicsError, InputError,
};
use lumguard_luma::transfer::{DISPLAY_GAMMA, unit_to_raw};
use lumguard_luma::{FrameSource, LumaFrame};
use tracing::{debug, trace};

use crate::scenario::{InputStep, Scenario, SceneSegment};

fn slot(action: ActionId) -> usize {
    match action {
        ActionId::Activate => 0,
        ActionId::ToggleReset => 1,
        ActionId::HoldReset => 2,
    }
}

/// A gain write observed by the simulated settings store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainWrite {
    /// Simulation time in seconds.
    pub at: f64,
    /// Perceptual gain written.
    pub gain: f32,
}

/// Simulated headset host.
#[derive(Debug)]
pub struct SimulatedHmd<C> {
    clock: C,
    bounds: GainBounds,
    // Settings stores keep analog gain; f64 keeps the round trip exact.
    analog: f64,
    reads: u64,
    read_after: Option<u64>,
    write_after: Option<u64>,
    writes: Vec<GainWrite>,
    script: Vec<InputStep>,
    next_step: usize,
    actions: [ActionState; 3],
    sounds: [(Cue, String); 3],
    cues: Vec<(f64, Cue)>,
    end_time: f64,
}

impl<C: Clock> SimulatedHmd<C> {
    /// Host for `scenario`, with cue sounds taken from `config`.
    pub fn new(scenario: &Scenario, config: &Config, clock: C) -> Self {
        let sounds = [Cue::Activate, Cue::AutoActivate, Cue::Reset].map(|cue| (cue, cue.sound(config).to_owned()));
        let mut hmd = Self {
            clock,
            bounds: scenario.device.bounds(),
            analog: 0.0,
            reads: 0,
            read_after: scenario.failures.read_after,
            write_after: scenario.failures.write_after,
            writes: Vec::new(),
            script: scenario.input.clone(),
            next_step: 0,
            actions: [ActionState::default(); 3],
            sounds,
            cues: Vec::new(),
            end_time: scenario.end_time(),
        };
        hmd.store(scenario.device.gain);
        hmd
    }

    fn store(&mut self, gain: f32) {
        self.analog = f64::from(gain).powf(f64::from(DISPLAY_GAMMA));
    }

    fn perceptual(&self) -> f32 {
        self.analog.powf(1.0 / f64::from(DISPLAY_GAMMA)) as f32
    }

    /// Current perceptual gain, without counting as a device read.
    pub fn gain(&self) -> f32 {
        self.perceptual()
    }

    /// Current analog gain as the settings store holds it.
    pub fn analog_gain(&self) -> f32 {
        self.analog as f32
    }

    /// Every successful gain write, in order.
    pub fn writes(&self) -> &[GainWrite] {
        &self.writes
    }

    /// Every cue played, with the simulation time.
    pub fn cues(&self) -> &[(f64, Cue)] {
        &self.cues
    }

    /// Fails all gain reads after `n` more succeed.
    pub fn fail_reads_after(&mut self, n: u64) {
        self.read_after = Some(self.reads + n);
    }

    /// Fails all gain writes after `n` more succeed.
    pub fn fail_writes_after(&mut self, n: u64) {
        self.write_after = Some(self.writes.len() as u64 + n);
    }

    /// Sound file configured for `cue`.
    fn sound(&self, cue: Cue) -> &str {
        self.sounds
            .iter()
            .find(|(c, _)| *c == cue)
            .map_or("", |(_, s)| s.as_str())
    }
}

impl<C: Clock> GainDevice for SimulatedHmd<C> {
    fn gain_bounds(&mut self) -> Result<GainBounds, DeviceError> {
        Ok(self.bounds)
    }

    fn read_gain(&mut self) -> Result<f32, DeviceError> {
        if self.read_after.is_some_and(|n| self.reads >= n) {
            return Err(DeviceError::Read("simulated settings store failure".into()));
        }
        self.reads += 1;
        Ok(self.perceptual())
    }

    fn write_gain(&mut self, gain: f32) -> Result<(), DeviceError> {
        if self.write_after.is_some_and(|n| self.writes.len() as u64 >= n) {
            return Err(DeviceError::Write {
                gain,
                reason: "simulated settings store failure".into(),
            });
        }
        let at = self.clock.now();
        self.store(gain);
        self.writes.push(GainWrite { at, gain });
        trace!(at, gain, analog = self.analog, "simulated gain write");
        Ok(())
    }
}

impl<C: Clock> InputSource for SimulatedHmd<C> {
    fn update(&mut self) -> Result<(), InputError> {
        for state in &mut self.actions {
            state.changed = false;
        }

        let now = self.clock.now();
        while let Some(step) = self.script.get(self.next_step) {
            if step.at > now {
                break;
            }
            let state = &mut self.actions[slot(step.action)];
            if state.pressed != step.pressed {
                state.pressed = step.pressed;
                state.changed = true;
                debug!(at = now, action = step.action.name(), pressed = step.pressed, "simulated input");
            }
            self.next_step += 1;
        }
        Ok(())
    }

    fn read_action_state(&mut self, action: ActionId) -> Result<ActionState, InputError> {
        Ok(self.actions[slot(action)])
    }
}

impl<C: Clock> CuePlayer for SimulatedHmd<C> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        let sound = self.sound(cue);
        if sound.is_empty() {
            return Err(CueError::MissingAsset {
                cue: cue.name(),
                path: String::new(),
            });
        }
        debug!(cue = cue.name(), sound, "simulated cue");
        let at = self.clock.now();
        self.cues.push((at, cue));
        Ok(())
    }
}

impl<C: Clock> QuitSignal for SimulatedHmd<C> {
    fn quit_requested(&mut self) -> bool {
        self.clock.now() >= self.end_time
    }
}

/// Synthetic per-eye frames following a scenario's scene timeline.
#[derive(Debug)]
pub struct SceneFrames<C> {
    clock: C,
    scene: Vec<SceneSegment>,
    width: u32,
    height: u32,
    locks: u64,
    lock_after: Option<u64>,
}

impl<C: Clock> SceneFrames<C> {
    /// Frame source for `scenario`.
    pub fn new(scenario: &Scenario, clock: C) -> Self {
        Self {
            clock,
            scene: scenario.scene.clone(),
            width: scenario.frame.width,
            height: scenario.frame.height,
            locks: 0,
            lock_after: scenario.failures.lock_after,
        }
    }

    /// Number of frames produced so far.
    pub fn frames_produced(&self) -> u64 {
        self.locks
    }
}

impl<C: Clock> FrameSource for SceneFrames<C> {
    fn acquire(&mut self, eye: Eye) -> Result<LumaFrame, GraphicsError> {
        if self.lock_after.is_some_and(|n| self.locks >= n) {
            return Err(GraphicsError::LockFailed {
                eye: eye.name(),
                reason: "simulated compositor failure".into(),
            });
        }
        self.locks += 1;

        let now = self.clock.now();
        let (level, spot) = match self.scene.iter().rev().find(|seg| seg.at <= now) {
            Some(seg) => (
                match eye {
                    Eye::Left => seg.left,
                    Eye::Right => seg.right,
                },
                seg.spot,
            ),
            None => (0.0, false),
        };

        let raw = unit_to_raw(level);
        if spot {
            let mut frame = LumaFrame::filled(self.width, self.height, 0)?;
            frame.set(self.width / 2, self.height / 2, raw);
            Ok(frame)
        } else {
            LumaFrame::filled(self.width, self.height, raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use lumguard_control::VirtualClock;
    use lumguard_luma::{LuminanceSampler, reduce::ReduceOp, reduce::reduce};

    fn scenario(yaml: &str) -> Scenario {
        Scenario::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_gain_round_trip_is_exact() {
        let clock = VirtualClock::new();
        let mut hmd = SimulatedHmd::new(&Scenario::default(), &Config::default(), clock);
        for gain in [0.2f32, 0.3125, 0.5, 0.625, 0.75, 1.0, 1.6] {
            hmd.write_gain(gain).unwrap();
            assert_eq!(hmd.read_gain().unwrap(), gain);
        }
        hmd.write_gain(0.5).unwrap();
        assert_abs_diff_eq!(hmd.analog_gain(), 0.5f32.powf(2.2), epsilon = 1e-6);
    }

    #[test]
    fn test_changed_for_one_poll() {
        let clock = VirtualClock::new();
        let s = scenario("input: [ { at: 0.5, action: activate, pressed: true } ]");
        let mut hmd = SimulatedHmd::new(&s, &Config::default(), clock.clone());

        hmd.update().unwrap();
        assert_eq!(hmd.read_action_state(ActionId::Activate).unwrap(), ActionState::default());

        clock.advance(0.5);
        hmd.update().unwrap();
        assert_eq!(hmd.read_action_state(ActionId::Activate).unwrap(), ActionState::PRESS);

        clock.advance(0.1);
        hmd.update().unwrap();
        assert_eq!(hmd.read_action_state(ActionId::Activate).unwrap(), ActionState::HELD);
    }

    #[test]
    fn test_redundant_step_is_not_a_change() {
        let clock = VirtualClock::new();
        let s = scenario("input: [ { at: 0, action: hold_reset, pressed: false } ]");
        let mut hmd = SimulatedHmd::new(&s, &Config::default(), clock);
        hmd.update().unwrap();
        assert!(!hmd.read_action_state(ActionId::HoldReset).unwrap().changed);
    }

    #[test]
    fn test_missing_sound_is_cue_error() {
        let clock = VirtualClock::new();
        let mut config = Config::default();
        config.reset_sound.clear();
        let mut hmd = SimulatedHmd::new(&Scenario::default(), &config, clock);

        assert!(hmd.play(Cue::Activate).is_ok());
        assert!(matches!(hmd.play(Cue::Reset), Err(CueError::MissingAsset { cue: "reset", .. })));
        assert_eq!(hmd.cues().len(), 1);
    }

    #[test]
    fn test_quit_at_end_time() {
        let clock = VirtualClock::new();
        let s = scenario("{ duration: 5, quit_at: 2 }");
        let mut hmd = SimulatedHmd::new(&s, &Config::default(), clock.clone());
        assert!(!hmd.quit_requested());
        clock.advance(2.0);
        assert!(hmd.quit_requested());
    }

    #[test]
    fn test_injected_failures() {
        let clock = VirtualClock::new();
        let mut hmd = SimulatedHmd::new(&Scenario::default(), &Config::default(), clock);
        hmd.fail_reads_after(1);
        hmd.fail_writes_after(0);
        assert!(hmd.read_gain().is_ok());
        assert!(matches!(hmd.read_gain(), Err(DeviceError::Read(_))));
        assert!(matches!(hmd.write_gain(0.5), Err(DeviceError::Write { .. })));
        assert_eq!(hmd.gain(), 1.0);
    }

    #[test]
    fn test_spot_frame_survives_max_reduction() {
        let clock = VirtualClock::new();
        let s = scenario("{ frame: { width: 33, height: 17 }, scene: [ { at: 0, left: 0.9, right: 0.0, spot: true } ] }");
        let mut frames = SceneFrames::new(&s, clock);

        let left = frames.acquire(Eye::Left).unwrap();
        assert_eq!(reduce(&left, ReduceOp::Max), unit_to_raw(0.9));
        assert!(reduce(&left, ReduceOp::Average) < unit_to_raw(0.9));
        assert_eq!(reduce(&frames.acquire(Eye::Right).unwrap(), ReduceOp::Max), 0);
    }

    #[test]
    fn test_frames_follow_clock() {
        let clock = VirtualClock::new();
        let s = scenario("scene: [ { at: 1.0, left: 1.0, right: 1.0 } ]");
        let mut sampler = LuminanceSampler::new(SceneFrames::new(&s, clock.clone()));

        assert_eq!(sampler.sample(0.5).unwrap().brightness, 0.0);
        clock.advance(1.0);
        let sample = sampler.sample(1.0).unwrap();
        assert_eq!(sample.brightness, 1.0);
        assert_abs_diff_eq!(sample.rate.unwrap(), 1.0);
        assert_eq!(sampler.source().frames_produced(), 4);
    }

    #[test]
    fn test_lock_failure() {
        let clock = VirtualClock::new();
        let s = scenario("failures: { lock_after: 1 }");
        let mut frames = SceneFrames::new(&s, clock);
        assert!(frames.acquire(Eye::Left).is_ok());
        assert!(matches!(frames.acquire(Eye::Right), Err(GraphicsError::LockFailed { eye: "right", .. })));
    }
}
