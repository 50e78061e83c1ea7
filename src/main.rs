//! pvvis - Main Entry Point
//!
//! Live viewer for control-system process variables. Takes a YAML model
//! description as its only argument; without one it serves a built-in
//! demo model from a simulated controller.

use pvvis_rs::config::{UiState, VisConfig};
use pvvis_rs::controller::sim::{ImagePattern, SignalPattern};
use pvvis_rs::controller::{shared, SimulatedController};
use pvvis_rs::frontend::VisApp;
use pvvis_rs::widgets::{ImagePlot, Striptool};
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEMO_CONFIG: &str = r#"
name: demo_model
tick_interval_ms: 250
striptool:
  limit: 200
image_plot:
  palette: viridis
scalars:
  - name: beam_current
    units: mA
  - name: beam_energy
    units: GeV
  - name: bunch_charge
images:
  - name: beam_profile
    axis_labels: [x, y]
    axis_units: [mm, mm]
    extents: { x: -4.0, y: -3.0, dw: 8.0, dh: 6.0 }
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pvvis_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("loading model config from {}", path);
            VisConfig::load(&path)?
        }
        None => {
            tracing::info!("no model config given, serving the built-in demo model");
            VisConfig::from_yaml_str(DEMO_CONFIG)?
        }
    };

    let controller = shared(build_demo_controller(&config));
    let ui_state = UiState::load_or_default();

    let striptool = if config.scalars.is_empty() {
        None
    } else {
        Some(Striptool::new(
            config.scalars.clone(),
            Rc::clone(&controller),
            config.striptool.limit,
        )?)
    };

    let image_plot = if config.images.is_empty() {
        None
    } else {
        let (palette, mapper) = config.color_options()?;
        Some(ImagePlot::new(
            config.images.clone(),
            Rc::clone(&controller),
            palette,
            mapper,
        )?)
    };

    let title = format!("pvvis - {}", config.name);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 640.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    let app = VisApp::new(
        striptool,
        image_plot,
        Rc::clone(&controller),
        config.tick_interval(),
        ui_state,
    );

    eframe::run_native(&title, native_options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("failed to run viewer: {e}"))?;

    tracing::info!("shutting down");
    Ok(())
}

/// Wire every configured variable to a simulated signal source
fn build_demo_controller(config: &VisConfig) -> SimulatedController {
    let mut sim = SimulatedController::new();

    for (i, variable) in config.scalars.iter().enumerate() {
        let pattern = match i % 3 {
            0 => SignalPattern::Sine {
                frequency: 0.1,
                amplitude: 1.0 + i as f64,
                offset: 2.0 * i as f64,
            },
            1 => SignalPattern::Counter {
                step: 0.5,
                min: 0.0,
                max: 50.0,
            },
            _ => SignalPattern::Sawtooth {
                period: 8.0,
                amplitude: 5.0,
            },
        };
        sim.register_scalar(&variable.name, pattern);
        sim.set_noise(&variable.name, 0.05);
    }

    for variable in &config.images {
        sim.register_image(&variable.name, 64, 48, ImagePattern::Spot { sigma: 6.0 });
    }

    sim
}
