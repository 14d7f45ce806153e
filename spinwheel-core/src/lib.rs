//! Spinwheel Engine
//!
//! Platform-agnostic core of the Spinwheel lucky wheel: winner selection,
//! rotation maths, and slot geometry. This crate holds no UI handles; render
//! layers observe it through [`WheelView`].

pub mod config;
pub mod layout;
pub mod numbers;
pub mod palette;
pub mod policy;
pub mod rng;
pub mod roster;
pub mod rotation;
pub mod scenario;
pub mod selection;
pub mod tracker;

// Re-export commonly used types
pub use config::{ConfigError, WheelConfig};
pub use layout::{LabelMetrics, Segment, WheelLayout};
pub use palette::Palette;
pub use policy::{OutcomePolicy, Selection, SequencedPolicy};
pub use rng::{CountingRng, SpinStreams, WheelRng};
pub use roster::{parse_names, remove_all, remove_first};
pub use rotation::{RotationCalculator, normalize_degrees, segment_angle, slot_under_pointer};
pub use scenario::{ScenarioRule, ScenarioSet};
pub use selection::{SelectionEngine, SpinOutcome};
pub use tracker::{ConsumptionTracker, ResetReason, TrackerKind};

/// Render observer driven by [`Wheel`].
/// Platform-specific implementations own the actual drawing surface.
pub trait WheelView {
    /// Redraw every slot after the candidate list changed.
    fn render(&mut self, layout: &WheelLayout);

    /// Animate the wheel to an absolute cumulative rotation over `duration_ms`.
    /// A zero duration means jump without animating.
    fn rotate_to(&mut self, rotation_deg: f64, duration_ms: u32);
}

/// Headless view for simulations and tests.
impl WheelView for () {
    fn render(&mut self, _layout: &WheelLayout) {}

    fn rotate_to(&mut self, _rotation_deg: f64, _duration_ms: u32) {}
}

/// Selection engine, cumulative rotation, and a render observer behind one handle.
#[derive(Debug)]
pub struct Wheel<V: WheelView> {
    engine: SelectionEngine,
    calculator: RotationCalculator,
    rotation: f64,
    jitter_rng: WheelRng,
    palette_rng: WheelRng,
    view: V,
}

impl<V: WheelView> Wheel<V> {
    /// Create a wheel whose random streams all derive from `seed`.
    #[must_use]
    pub fn new(cfg: &WheelConfig, seed: u64, view: V) -> Self {
        let SpinStreams {
            selection,
            jitter,
            palette,
        } = SpinStreams::from_user_seed(seed);
        Self {
            engine: SelectionEngine::new(cfg, selection),
            calculator: RotationCalculator::from_config(cfg),
            rotation: 0.0,
            jitter_rng: jitter,
            palette_rng: palette,
            view,
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Cumulative rotation in degrees.
    #[must_use]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    #[must_use]
    pub fn layout(&self) -> WheelLayout {
        WheelLayout::compute(self.engine.names(), self.engine.palette())
    }

    #[must_use]
    pub fn colors(&self) -> &[String] {
        self.engine.palette().colors()
    }

    /// Shuffled copy of the palette drawn from the palette stream.
    pub fn shuffled_colors(&mut self) -> Vec<String> {
        self.engine.palette().shuffled(&mut self.palette_rng)
    }

    /// Replace the candidates and redraw. An empty list also rewinds the wheel.
    pub fn set_names(&mut self, names: Vec<String>) {
        self.engine.set_names(names);
        if self.engine.slot_count() == 0 {
            self.rotation = 0.0;
            self.view.rotate_to(0.0, 0);
        }
        let layout = self.layout();
        self.view.render(&layout);
    }

    pub fn set_predetermined_order(&mut self, order: Vec<String>) {
        self.engine.set_predetermined_order(order);
    }

    /// Pick a winner and start the rotation towards its slot.
    pub fn spin(&mut self) -> Option<SpinOutcome> {
        let outcome = self.engine.spin()?;
        if let Some(next) = self.calculator.compute_rotation(
            self.rotation,
            outcome.slot_index,
            self.engine.slot_count(),
            &mut self.jitter_rng,
        ) {
            self.rotation = next;
            self.view.rotate_to(next, outcome.duration_ms);
        }
        Some(outcome)
    }

    /// Animation-completion hook; allows the next spin.
    pub fn finish_spin(&mut self) {
        self.engine.finish_spin();
    }

    /// Rewind to 0 degrees and clear the spinning guard and consumption.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.rotation = 0.0;
        self.view.rotate_to(0.0, 0);
    }
}
