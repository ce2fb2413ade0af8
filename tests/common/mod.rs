//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

/// Preamble written by the device at the top of every export
pub const PREAMBLE: &str = "Combustion Inc. Probe Data\nProbe S/N: 10005205\nProbe Firmware Revision: v2.2.0";

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
