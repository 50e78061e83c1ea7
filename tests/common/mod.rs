//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use pvvis_rs::controller::sim::SimulatedController;
use pvvis_rs::types::{ImageExtents, ImageVariable, ScalarVariable};

/// The two scalar variables used across the workflow tests
pub fn beam_variables() -> Vec<ScalarVariable> {
    vec![
        ScalarVariable::new("beam_current").with_units("mA"),
        ScalarVariable::new("beam_energy"),
    ]
}

/// A controller scripted with the canonical beam scenario:
/// three beam_current samples, then one beam_energy sample
pub fn scripted_beam_controller() -> SimulatedController {
    let mut sim = SimulatedController::new();
    for value in [1.0, 1.2, 1.1] {
        sim.push_scalar("beam_current", value);
    }
    sim.push_scalar("beam_energy", 5.0);
    sim
}

/// An image variable with units on both axes
pub fn profile_variable() -> ImageVariable {
    ImageVariable::new(
        "beam_profile",
        ("x", "y"),
        ImageExtents::new(-4.0, -3.0, 8.0, 6.0),
    )
    .with_axis_units(("mm", "mm"))
}
