//! Simulated controller for demos and testing
//!
//! This module provides a controller that serves generated values instead
//! of talking to a real transport. It is used by the demo binary and by
//! tests that need deterministic sequences.
//!
//! # Signal Patterns
//!
//! Registered scalar channels generate values from a pattern:
//!
//! - [`SignalPattern::Constant`] - Fixed value (useful for static displays)
//! - [`SignalPattern::Sine`] - Sinusoidal wave with configurable frequency/amplitude
//! - [`SignalPattern::Counter`] - Incrementing counter with wrap-around
//! - [`SignalPattern::Sawtooth`] - Linear ramp that resets periodically
//!
//! Image channels generate synthetic rasters ([`ImagePattern`]).
//!
//! # Scripting
//!
//! Tests can queue exact values or failures per channel with
//! [`SimulatedController::push_scalar`] and friends; queued steps are
//! served before the pattern kicks back in.

use crate::controller::{Controller, ControllerStats, ImageValue};
use crate::error::{PvVisError, Result};
use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Pattern for generating scalar values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalPattern {
    /// Constant value
    Constant(f64),
    /// Sine wave with frequency and amplitude
    Sine {
        frequency: f64,
        amplitude: f64,
        offset: f64,
    },
    /// Counter that increments per fetch
    Counter { step: f64, min: f64, max: f64 },
    /// Sawtooth wave
    Sawtooth { period: f64, amplitude: f64 },
}

impl Default for SignalPattern {
    fn default() -> Self {
        SignalPattern::Sine {
            frequency: 0.2,
            amplitude: 1.0,
            offset: 0.0,
        }
    }
}

/// Pattern for generating image payloads
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImagePattern {
    /// Constant pixel value
    Constant(f64),
    /// A Gaussian spot orbiting the center of the frame
    Spot { sigma: f64 },
    /// A diagonal gradient, useful for checking orientation by eye
    Gradient,
}

/// A queued scripted step for a scalar channel
#[derive(Debug, Clone)]
enum ScalarStep {
    Value(f64),
    Fail(String),
}

/// A queued scripted step for an image channel
#[derive(Debug, Clone)]
enum ImageStep {
    Value(ImageValue),
    Fail(String),
}

#[derive(Debug)]
struct ScalarChannel {
    pattern: SignalPattern,
    counter_value: f64,
    noise_amplitude: f64,
    queued: VecDeque<ScalarStep>,
}

impl ScalarChannel {
    fn new(pattern: SignalPattern) -> Self {
        Self {
            pattern,
            counter_value: 0.0,
            noise_amplitude: 0.0,
            queued: VecDeque::new(),
        }
    }

    fn generate(&mut self, elapsed_secs: f64) -> f64 {
        let base_value = match self.pattern {
            SignalPattern::Constant(v) => v,
            SignalPattern::Sine {
                frequency,
                amplitude,
                offset,
            } => {
                offset
                    + amplitude * (2.0 * std::f64::consts::PI * frequency * elapsed_secs).sin()
            }
            SignalPattern::Counter { step, min, max } => {
                self.counter_value += step;
                if self.counter_value > max {
                    self.counter_value = min;
                } else if self.counter_value < min {
                    self.counter_value = max;
                }
                self.counter_value
            }
            SignalPattern::Sawtooth { period, amplitude } => {
                let t = elapsed_secs % period;
                amplitude * (t / period)
            }
        };

        if self.noise_amplitude > 0.0 {
            base_value + (rand_simple() - 0.5) * 2.0 * self.noise_amplitude
        } else {
            base_value
        }
    }
}

#[derive(Debug)]
struct ImageChannel {
    width: usize,
    height: usize,
    pattern: ImagePattern,
    queued: VecDeque<ImageStep>,
}

impl ImageChannel {
    fn generate(&self, elapsed_secs: f64) -> ImageValue {
        let (w, h) = (self.width, self.height);
        let mut data = Vec::with_capacity(w * h);
        match self.pattern {
            ImagePattern::Constant(v) => data.resize(w * h, v),
            ImagePattern::Spot { sigma } => {
                // Orbit the spot around a point slightly off-center so the
                // frame stays visually asymmetric.
                let phase = 2.0 * std::f64::consts::PI * elapsed_secs / 5.0;
                let cx = w as f64 * 0.5 + w as f64 * 0.2 * phase.cos();
                let cy = h as f64 * 0.4 + h as f64 * 0.2 * phase.sin();
                let denom = 2.0 * sigma * sigma;
                for row in 0..h {
                    for col in 0..w {
                        let dx = col as f64 - cx;
                        let dy = row as f64 - cy;
                        data.push((-(dx * dx + dy * dy) / denom).exp());
                    }
                }
            }
            ImagePattern::Gradient => {
                for row in 0..h {
                    for col in 0..w {
                        data.push(col as f64 + 2.0 * row as f64);
                    }
                }
            }
        }
        ImageValue::new(w, h, data)
    }
}

/// Simple pseudo-random number generator (no external dependency)
fn rand_simple() -> f64 {
    use std::cell::Cell;
    thread_local! {
        static SEED: Cell<u64> = Cell::new(12345);
    }
    SEED.with(|seed| {
        let mut s = seed.get();
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        seed.set(s);
        (s as f64) / (u64::MAX as f64)
    })
}

/// Controller that serves generated values instead of live PVs
pub struct SimulatedController {
    /// Start time for pattern generation
    start_time: Instant,
    /// Registered scalar channels by variable name
    scalars: HashMap<String, ScalarChannel>,
    /// Registered image channels by variable name
    images: HashMap<String, ImageChannel>,
    /// Fetch statistics
    stats: ControllerStats,
}

impl SimulatedController {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            scalars: HashMap::new(),
            images: HashMap::new(),
            stats: ControllerStats::default(),
        }
    }

    /// Register a scalar channel with a generation pattern
    pub fn register_scalar(&mut self, name: impl Into<String>, pattern: SignalPattern) {
        self.scalars
            .insert(name.into(), ScalarChannel::new(pattern));
    }

    /// Register an image channel with a generation pattern
    pub fn register_image(
        &mut self,
        name: impl Into<String>,
        width: usize,
        height: usize,
        pattern: ImagePattern,
    ) {
        self.images.insert(
            name.into(),
            ImageChannel {
                width,
                height,
                pattern,
                queued: VecDeque::new(),
            },
        );
    }

    /// Add noise to a registered scalar channel
    pub fn set_noise(&mut self, name: &str, amplitude: f64) {
        if let Some(channel) = self.scalars.get_mut(name) {
            channel.noise_amplitude = amplitude;
        }
    }

    /// Queue an exact value on a scalar channel, served before the pattern
    ///
    /// Registers the channel with a constant pattern if it does not exist
    /// yet, so tests can script a channel in one call.
    pub fn push_scalar(&mut self, name: &str, value: f64) {
        self.scalars
            .entry(name.to_string())
            .or_insert_with(|| ScalarChannel::new(SignalPattern::Constant(0.0)))
            .queued
            .push_back(ScalarStep::Value(value));
    }

    /// Queue a fetch failure on a scalar channel
    pub fn push_scalar_failure(&mut self, name: &str, message: impl Into<String>) {
        self.scalars
            .entry(name.to_string())
            .or_insert_with(|| ScalarChannel::new(SignalPattern::Constant(0.0)))
            .queued
            .push_back(ScalarStep::Fail(message.into()));
    }

    /// Queue an exact payload on an image channel
    ///
    /// Registers the channel if it does not exist yet, taking the shape
    /// from the pushed payload.
    pub fn push_image(&mut self, name: &str, value: ImageValue) {
        self.images
            .entry(name.to_string())
            .or_insert_with(|| ImageChannel {
                width: value.width,
                height: value.height,
                pattern: ImagePattern::Constant(0.0),
                queued: VecDeque::new(),
            })
            .queued
            .push_back(ImageStep::Value(value));
    }

    /// Queue a fetch failure on an image channel
    ///
    /// Registers a 1x1 placeholder channel if it does not exist yet.
    pub fn push_image_failure(&mut self, name: &str, message: impl Into<String>) {
        self.images
            .entry(name.to_string())
            .or_insert_with(|| ImageChannel {
                width: 1,
                height: 1,
                pattern: ImagePattern::Constant(0.0),
                queued: VecDeque::new(),
            })
            .queued
            .push_back(ImageStep::Fail(message.into()));
    }

    fn fetch_scalar(&mut self, name: &str) -> Result<f64> {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let channel = self
            .scalars
            .get_mut(name)
            .ok_or_else(|| PvVisError::fetch(name, "no such scalar channel"))?;

        match channel.queued.pop_front() {
            Some(ScalarStep::Value(v)) => Ok(v),
            Some(ScalarStep::Fail(message)) => Err(PvVisError::fetch(name, message)),
            None => Ok(channel.generate(elapsed)),
        }
    }

    fn fetch_image(&mut self, name: &str) -> Result<ImageValue> {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let channel = self
            .images
            .get_mut(name)
            .ok_or_else(|| PvVisError::fetch(name, "no such image channel"))?;

        match channel.queued.pop_front() {
            Some(ImageStep::Value(v)) => Ok(v),
            Some(ImageStep::Fail(message)) => Err(PvVisError::fetch(name, message)),
            None => Ok(channel.generate(elapsed)),
        }
    }
}

impl Default for SimulatedController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for SimulatedController {
    fn get_value(&mut self, name: &str) -> Result<f64> {
        let start = Instant::now();
        let result = self.fetch_scalar(name);
        let elapsed = start.elapsed().as_micros().max(1) as u64;

        match &result {
            Ok(_) => self.stats.record_success(elapsed),
            Err(_) => self.stats.record_failure(),
        }

        result
    }

    fn get_image(&mut self, name: &str) -> Result<ImageValue> {
        let start = Instant::now();
        let result = self.fetch_image(name);
        let elapsed = start.elapsed().as_micros().max(1) as u64;

        match &result {
            Ok(_) => self.stats.record_success(elapsed),
            Err(_) => self.stats.record_failure(),
        }

        result
    }

    fn put_value(&mut self, name: &str, value: f64) -> Result<()> {
        let channel = self
            .scalars
            .get_mut(name)
            .ok_or_else(|| PvVisError::fetch(name, "no such scalar channel"))?;
        // Writing a PV pins the simulated channel to the written value.
        channel.pattern = SignalPattern::Constant(value);
        tracing::debug!("simulated put {} = {}", name, value);
        Ok(())
    }

    fn stats(&self) -> ControllerStats {
        self.stats.clone()
    }
}
