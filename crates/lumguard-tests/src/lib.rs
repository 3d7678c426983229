//! Integration tests for lumguard crates.
//!
//! End-to-end sessions run the real scheduler, controller and sampler
//! against the simulated headset from `lumguard-sim`, using the scenario
//! files shipped under `scenarios/`.

#[cfg(test)]
mod trace;
