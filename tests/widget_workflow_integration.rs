//! Integration tests for the monitor/widget synchronization workflow
//!
//! These tests drive the widgets the way a host event loop would: script
//! the controller, tick `update()`, and check what lands in the render
//! sources.

mod common;

use common::{beam_variables, profile_variable, scripted_beam_controller};
use pvvis_rs::controller::{shared, ImageValue, SimulatedController};
use pvvis_rs::error::PvVisError;
use pvvis_rs::{ImagePlot, Palette, Striptool};
use std::rc::Rc;

#[test]
fn test_striptool_end_to_end() {
    let controller = shared(scripted_beam_controller());
    let mut striptool = Striptool::new(beam_variables(), controller, None).unwrap();

    // Three ticks on the initial live variable.
    for _ in 0..3 {
        striptool.update().unwrap();
    }
    assert_eq!(striptool.source().y_label(), "beam_current (mA)");
    assert_eq!(striptool.source().y(), &[1.0, 1.2, 1.1]);
    let x = striptool.source().x().to_vec();
    assert_eq!(x.len(), 3);
    assert!(x.windows(2).all(|w| w[0] <= w[1]));

    // Switch live variable; its series starts from its own history.
    striptool.select("beam_energy").unwrap();
    striptool.update().unwrap();
    assert_eq!(striptool.source().y_label(), "beam_energy");
    assert_eq!(striptool.source().y(), &[5.0]);
    assert_eq!(striptool.source().x().len(), 1);
}

#[test]
fn test_striptool_limit_renders_exact_tail() {
    let mut sim = scripted_beam_controller();
    for value in [2.0, 3.0, 4.0] {
        sim.push_scalar("beam_current", value);
    }
    let controller = shared(sim);
    let mut striptool = Striptool::new(beam_variables(), controller, Some(2)).unwrap();

    for _ in 0..6 {
        striptool.update().unwrap();
    }
    // Six polls, window of two: only the most recent samples render, in
    // original order, while the monitor keeps everything.
    assert_eq!(striptool.source().y(), &[3.0, 4.0]);
    assert_eq!(striptool.monitor("beam_current").unwrap().len(), 6);
}

#[test]
fn test_striptool_reset_restarts_series() {
    let controller = shared(scripted_beam_controller());
    let mut striptool = Striptool::new(beam_variables(), controller, None).unwrap();

    striptool.update().unwrap();
    striptool.update().unwrap();
    let before_reset = striptool.source().len();

    striptool.reset_active();
    striptool.update().unwrap();
    let after_reset = striptool.source().len();

    assert_ne!(before_reset, after_reset);
    assert_eq!(after_reset, 1);
    assert_eq!(striptool.source().y(), &[1.1]);
}

#[test]
fn test_striptool_fetch_error_leaves_last_frame() {
    let mut sim = scripted_beam_controller();
    sim.push_scalar_failure("beam_current", "ioc rebooting");
    let controller = shared(sim);
    let mut striptool = Striptool::new(beam_variables(), controller, None).unwrap();

    for _ in 0..3 {
        striptool.update().unwrap();
    }
    let frame = striptool.source().clone();

    let err = striptool.update().unwrap_err();
    assert!(matches!(err, PvVisError::Fetch { .. }));
    assert_eq!(striptool.source(), &frame);

    // A failed poll appended nothing; the monitor still holds the three
    // good samples for the next tick to build on.
    assert_eq!(striptool.monitor("beam_current").unwrap().len(), 3);
}

#[test]
fn test_image_plot_end_to_end() {
    let mut sim = SimulatedController::new();
    // 2x3 source grid with a marked corner value.
    sim.push_image(
        "beam_profile",
        ImageValue::new(3, 2, vec![9.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
    );
    let controller = shared(sim);
    let mut plot = ImagePlot::new(
        vec![profile_variable()],
        controller,
        Some(Palette::Viridis),
        None,
    )
    .unwrap();

    plot.update(None).unwrap();
    let source = plot.source();

    // Transpose + vertical flip, applied exactly once: the marked source
    // corner ends up where the pinned orientation puts it.
    assert_eq!(source.image().width(), 2);
    assert_eq!(source.image().height(), 3);
    assert_eq!(source.image().data(), &[3.0, 6.0, 2.0, 5.0, 9.0, 4.0]);

    // Geometry and labels always travel with the pixels.
    assert_eq!(source.extents(), (-4.0, -3.0, 8.0, 6.0));
    assert_eq!(source.x_label(), "x (mm)");
    assert_eq!(source.y_label(), "y (mm)");
}

#[test]
fn test_image_plot_requires_color_choice() {
    let controller = shared(scripted_beam_controller());
    let err = ImagePlot::new(vec![profile_variable()], controller, None, None).unwrap_err();
    assert!(matches!(err, PvVisError::Config(_)));
}

#[test]
fn test_shared_controller_feeds_both_widgets() {
    let mut sim = scripted_beam_controller();
    sim.push_image("beam_profile", ImageValue::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]));
    let controller = shared(sim);

    let mut striptool =
        Striptool::new(beam_variables(), Rc::clone(&controller), None).unwrap();
    let mut plot = ImagePlot::new(
        vec![profile_variable()],
        Rc::clone(&controller),
        Some(Palette::Grays),
        None,
    )
    .unwrap();

    striptool.update().unwrap();
    plot.update(None).unwrap();

    assert_eq!(striptool.source().y(), &[1.0]);
    assert!(!plot.source().is_empty());
}
