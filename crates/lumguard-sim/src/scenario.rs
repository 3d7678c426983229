//! Scripted headset sessions.
//!
//! A scenario fixes everything the real runtime would supply: the display
//! gain range and starting gain, a piecewise-constant scene luminance per
//! eye, a timeline of action transitions and when to quit.
//!
//! ```yaml
//! duration: 12.0
//! device: { min: 0.2, max: 1.6, gain: 1.0 }
//! frame: { width: 64, height: 36 }
//! scene:
//!   - { at: 0.0, left: 0.05, right: 0.05 }
//!   - { at: 2.0, left: 0.9, right: 0.6, spot: true }
//! input:
//!   - { at: 1.0, action: activate, pressed: true }
//!   - { at: 1.1, action: activate, pressed: false }
//! quit_at: 11.0
//! ```
//!
//! Scene levels are linear light in [0, 1], quantized to 16 bit when a
//! frame is produced.

use std::path::Path;

use lumguard_core::{ActionId, GainBounds};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Simulated display settings store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSpec {
    /// Lowest perceptual gain.
    pub min: f32,
    /// Highest perceptual gain.
    pub max: f32,
    /// Perceptual gain at startup.
    pub gain: f32,
}

impl Default for DeviceSpec {
    fn default() -> Self {
        Self {
            min: 0.2,
            max: 1.6,
            gain: 1.0,
        }
    }
}

impl DeviceSpec {
    /// Gain range as [`GainBounds`].
    pub fn bounds(&self) -> GainBounds {
        GainBounds::new(self.min, self.max)
    }
}

/// Size of the synthetic per-eye frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSpec {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self { width: 64, height: 36 }
    }
}

/// Scene luminance from `at` until the next segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneSegment {
    /// Start time in seconds.
    pub at: f64,
    /// Left eye level.
    pub left: f32,
    /// Right eye level.
    pub right: f32,
    /// Light only the centre pixel; the rest of the frame is black.
    #[serde(default)]
    pub spot: bool,
}

/// One scripted action transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputStep {
    /// Time in seconds.
    pub at: f64,
    /// Which action.
    pub action: ActionId,
    /// New level.
    pub pressed: bool,
}

/// Injected host failures, counted in operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureSpec {
    /// Fail every gain read after this many succeeded.
    pub read_after: Option<u64>,
    /// Fail every gain write after this many succeeded.
    pub write_after: Option<u64>,
    /// Fail every frame lock after this many succeeded.
    pub lock_after: Option<u64>,
}

/// A complete scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Session length in seconds.
    pub duration: f64,
    /// Display settings store.
    pub device: DeviceSpec,
    /// Frame size.
    pub frame: FrameSpec,
    /// Scene timeline.
    pub scene: Vec<SceneSegment>,
    /// Input timeline.
    pub input: Vec<InputStep>,
    /// Earlier quit request, if any.
    pub quit_at: Option<f64>,
    /// Injected failures.
    pub failures: FailureSpec,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            duration: 10.0,
            device: DeviceSpec::default(),
            frame: FrameSpec::default(),
            scene: Vec::new(),
            input: Vec::new(),
            quit_at: None,
            failures: FailureSpec::default(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::Invalid(msg.into())
}

fn check_time(what: &str, t: f64) -> SimResult<()> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{what} time must be >= 0, got {t}")))
    }
}

impl Scenario {
    /// Loads a scenario from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SimError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses and checks a scenario. Timelines are sorted by time.
    pub fn from_yaml_str(yaml: &str) -> SimResult<Self> {
        let mut scenario: Self = serde_yaml::from_str(yaml)?;
        scenario.normalize()?;
        Ok(scenario)
    }

    /// Validates values and sorts both timelines.
    pub fn normalize(&mut self) -> SimResult<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(invalid(format!("duration must be > 0, got {}", self.duration)));
        }
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(invalid(format!(
                "frame must be at least 1x1, got {}x{}",
                self.frame.width, self.frame.height
            )));
        }

        let d = self.device;
        if !(d.min.is_finite() && d.max.is_finite() && d.min <= d.max) {
            return Err(invalid(format!("device range [{}, {}] is empty", d.min, d.max)));
        }
        if !(d.min..=d.max).contains(&d.gain) {
            return Err(invalid(format!(
                "device gain {} outside [{}, {}]",
                d.gain, d.min, d.max
            )));
        }

        for seg in &self.scene {
            check_time("scene", seg.at)?;
            for level in [seg.left, seg.right] {
                if !(0.0..=1.0).contains(&level) {
                    return Err(invalid(format!("scene level {level} at {}s outside [0, 1]", seg.at)));
                }
            }
        }
        for step in &self.input {
            check_time("input", step.at)?;
        }
        if let Some(t) = self.quit_at {
            check_time("quit", t)?;
        }

        self.scene.sort_by(|a, b| a.at.total_cmp(&b.at));
        self.input.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(())
    }

    /// Scene segment in effect at `t`, if any has started.
    pub fn scene_at(&self, t: f64) -> Option<&SceneSegment> {
        self.scene.iter().rev().find(|seg| seg.at <= t)
    }

    /// Time at which the session ends.
    pub fn end_time(&self) -> f64 {
        match self.quit_at {
            Some(t) => t.min(self.duration),
            None => self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
duration: 12.0
device: { min: 0.2, max: 1.6, gain: 1.0 }
frame: { width: 32, height: 18 }
scene:
  - { at: 2.0, left: 0.9, right: 0.6, spot: true }
  - { at: 0.0, left: 0.05, right: 0.05 }
input:
  - { at: 4.0, action: toggle_reset, pressed: true }
  - { at: 1.0, action: activate, pressed: true }
quit_at: 11.0
"#;

    #[test]
    fn test_parse_and_sort() {
        let s = Scenario::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(s.frame, FrameSpec { width: 32, height: 18 });
        assert_eq!(s.scene[0].at, 0.0);
        assert!(s.scene[1].spot);
        assert_eq!(s.input[0].action, ActionId::Activate);
        assert_eq!(s.input[1].action, ActionId::ToggleReset);
        assert_eq!(s.end_time(), 11.0);
    }

    #[test]
    fn test_scene_lookup() {
        let s = Scenario::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(s.scene_at(1.99).unwrap().left, 0.05);
        assert_eq!(s.scene_at(2.0).unwrap().left, 0.9);
        assert!(Scenario::default().scene_at(5.0).is_none());
    }

    #[test]
    fn test_minimal_uses_defaults() {
        let s = Scenario::from_yaml_str("duration: 3").unwrap();
        assert_eq!(s.device, DeviceSpec::default());
        assert_eq!(s.frame, FrameSpec::default());
        assert!(s.quit_at.is_none());
        assert_eq!(s.end_time(), 3.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        for yaml in [
            "duration: 0",
            "frame: { width: 0, height: 4 }",
            "device: { min: 1.0, max: 0.5, gain: 0.7 }",
            "device: { gain: 3.0 }",
            "scene: [ { at: 0, left: 1.5, right: 0 } ]",
            "input: [ { at: -1, action: activate, pressed: true } ]",
        ] {
            assert!(
                matches!(Scenario::from_yaml_str(yaml), Err(SimError::Invalid(_))),
                "accepted: {yaml}"
            );
        }
    }

    #[test]
    fn test_unknown_action_is_parse_error() {
        let yaml = "input: [ { at: 0, action: jump, pressed: true } ]";
        assert!(matches!(Scenario::from_yaml_str(yaml), Err(SimError::Yaml(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(Scenario::from_file(&path).unwrap().duration, 12.0);
        assert!(matches!(
            Scenario::from_file(dir.path().join("missing.yaml")),
            Err(SimError::NotFound { .. })
        ));
    }
}
