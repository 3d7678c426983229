//! Gamma transfer functions between stored, analog and perceptual values.
//!
//! Two places need a 2.2 power curve:
//!
//! - Frame readback: the reduced 16-bit value is linear-ish light and is
//!   mapped to perceptual brightness with `(raw / 65535)^(1/2.2)`.
//! - Display gain: the headset settings store keeps *analog* gain while the
//!   controller reasons in *perceptual* gain, `perceptual = analog^(1/2.2)`.
//!
//! # Range
//!
//! - Input/Output: [0, inf); zero and negative inputs map to 0

/// Display gamma used for both frame readback and gain conversion.
pub const DISPLAY_GAMMA: f32 = 2.2;

/// Largest 16-bit sample value.
pub const RAW_MAX: f32 = 65535.0;

/// EOTF for arbitrary gamma: `v^gamma`
///
/// # Example
///
/// ```rust
/// use lumguard_luma::transfer::gamma_eotf;
///
/// let linear = gamma_eotf(0.5, 2.2);
/// assert!((linear - 0.2176).abs() < 1e-3);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// OETF for arbitrary gamma: `l^(1/gamma)`
///
/// # Example
///
/// ```rust
/// use lumguard_luma::transfer::gamma_oetf;
///
/// let encoded = gamma_oetf(0.218, 2.2);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}

/// Normalizes a 16-bit sample to [0, 1].
#[inline]
pub fn raw_to_unit(raw: u16) -> f32 {
    f32::from(raw) / RAW_MAX
}

/// Quantizes a [0, 1] value to 16 bit, rounding to nearest.
#[inline]
pub fn unit_to_raw(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * RAW_MAX).round() as u16
}

/// Maps a reduced 16-bit frame value to perceptual brightness in [0, 1].
///
/// ```rust
/// use lumguard_luma::transfer::raw_to_perceptual;
///
/// assert_eq!(raw_to_perceptual(0), 0.0);
/// assert_eq!(raw_to_perceptual(u16::MAX), 1.0);
/// ```
#[inline]
pub fn raw_to_perceptual(raw: u16) -> f32 {
    gamma_oetf(raw_to_unit(raw), DISPLAY_GAMMA).clamp(0.0, 1.0)
}

/// Converts a stored analog display gain to perceptual gain.
#[inline]
pub fn analog_to_perceptual(analog: f32) -> f32 {
    gamma_oetf(analog, DISPLAY_GAMMA)
}

/// Converts a perceptual gain to the analog value the display stores.
#[inline]
pub fn perceptual_to_analog(perceptual: f32) -> f32 {
    gamma_eotf(perceptual, DISPLAY_GAMMA)
}
