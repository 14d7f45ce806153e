//! Winner selection for a single spin.
use serde::{Deserialize, Serialize};

use crate::config::WheelConfig;
use crate::palette::Palette;
use crate::policy::{OutcomePolicy, SequencedPolicy};
use crate::rng::WheelRng;
use crate::scenario::ScenarioSet;
use crate::tracker::{ConsumptionTracker, ListSnapshot, TrackerKind};

/// What the caller needs to animate and announce a spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinOutcome {
    pub winner: String,
    pub slot_index: usize,
    pub color: String,
    pub duration_ms: u32,
}

/// Candidate list, predetermined sequence, and the spinning guard.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    names: Vec<String>,
    order: Vec<String>,
    tracker: ConsumptionTracker,
    scenarios: ScenarioSet,
    palette: Palette,
    duration_ms: u32,
    spinning: bool,
    rng: WheelRng,
}

impl SelectionEngine {
    #[must_use]
    pub fn new(cfg: &WheelConfig, rng: WheelRng) -> Self {
        Self {
            names: Vec::new(),
            order: Vec::new(),
            tracker: ConsumptionTracker::new(cfg.tracker),
            scenarios: cfg.scenarios.clone(),
            palette: cfg.palette.clone(),
            duration_ms: cfg.spin_duration_ms,
            spinning: false,
            rng,
        }
    }

    /// Engine with a selection stream seeded directly from `seed`.
    #[must_use]
    pub fn with_seed(cfg: &WheelConfig, seed: u64) -> Self {
        Self::new(cfg, WheelRng::seeded(seed))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn predetermined_order(&self) -> &[String] {
        &self.order
    }

    #[must_use]
    pub const fn tracker(&self) -> &ConsumptionTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn tracker_kind(&self) -> TrackerKind {
        self.tracker.kind()
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.spinning
    }

    #[must_use]
    pub const fn rng(&self) -> &WheelRng {
        &self.rng
    }

    /// Replace the candidate list, clearing consumption when the new list
    /// cannot resume the current sequence.
    pub fn set_names(&mut self, names: Vec<String>) {
        let before = ListSnapshot::capture(&self.names, &self.order, &self.scenarios);
        let after = ListSnapshot::capture(&names, &self.order, &self.scenarios);
        if let Some(reason) = self.tracker.on_names_replaced(&before, &after) {
            log::debug!("consumption cleared on list replacement: {reason:?}");
        }
        self.names = names;
    }

    pub fn set_predetermined_order(&mut self, order: Vec<String>) {
        self.order = order;
    }

    /// Sequence in force for the current list: a matching scenario overrides the stored one.
    #[must_use]
    pub fn active_order(&self) -> &[String] {
        active_order_for(&self.scenarios, &self.names, &self.order)
    }

    /// Pick the winner of a new spin.
    ///
    /// Returns `None` without touching any state when the list is empty or a
    /// spin is still in flight.
    pub fn spin(&mut self) -> Option<SpinOutcome> {
        if self.names.is_empty() {
            return None;
        }
        if self.spinning {
            log::debug!("spin dropped: previous spin still in flight");
            return None;
        }

        let active = active_order_for(&self.scenarios, &self.names, &self.order);
        // Consumed names stay excluded even once the sequence is cleared.
        let plain_random = active.is_empty()
            && matches!(&self.tracker, ConsumptionTracker::NameSet(used) if used.is_empty());
        let policy = if plain_random {
            OutcomePolicy::Random
        } else {
            OutcomePolicy::Sequenced(SequencedPolicy::new(active, &self.tracker))
        };
        let selection = policy.select(&self.names, &mut self.rng)?;
        self.tracker.record(selection.predetermined.as_deref());
        self.spinning = true;

        Some(SpinOutcome {
            winner: self.names[selection.slot].clone(),
            slot_index: selection.slot,
            color: self.palette.color_for(selection.slot).to_string(),
            duration_ms: self.duration_ms,
        })
    }

    /// Called once the spin animation has finished.
    pub fn finish_spin(&mut self) {
        self.spinning = false;
    }

    /// Clear the spinning guard and all consumption.
    pub fn reset(&mut self) {
        self.spinning = false;
        self.tracker.clear();
    }
}

fn active_order_for<'a>(
    scenarios: &'a ScenarioSet,
    names: &[String],
    order: &'a [String],
) -> &'a [String] {
    scenarios
        .active(names)
        .map_or(order, |rule| rule.forced_order())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioRule;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn engine(seed: u64) -> SelectionEngine {
        SelectionEngine::with_seed(&WheelConfig::default(), seed)
    }

    fn spin_and_finish(engine: &mut SelectionEngine) -> SpinOutcome {
        let outcome = engine.spin().expect("spin allowed");
        engine.finish_spin();
        outcome
    }

    #[test]
    fn empty_list_never_spins() {
        let mut engine = engine(1);
        assert!(engine.spin().is_none());
        assert!(!engine.is_spinning());
    }

    #[test]
    fn spin_in_flight_blocks_the_next_one() {
        let mut engine = engine(2);
        engine.set_names(names(&["A", "B"]));
        engine.set_predetermined_order(names(&["B", "A"]));
        let first = engine.spin().expect("first spin");
        assert_eq!(first.winner, "B");
        assert!(engine.is_spinning());
        let snapshot = engine.tracker().clone();
        assert!(engine.spin().is_none());
        assert_eq!(engine.tracker(), &snapshot);
        engine.finish_spin();
        assert_eq!(spin_and_finish(&mut engine).winner, "A");
    }

    #[test]
    fn outcome_reports_slot_colour_and_duration() {
        let mut engine = engine(3);
        engine.set_names(names(&["A", "B", "C", "D", "E"]));
        engine.set_predetermined_order(names(&["E"]));
        let outcome = spin_and_finish(&mut engine);
        assert_eq!(outcome.slot_index, 4);
        assert_eq!(outcome.color, engine.palette().color_for(4));
        assert_eq!(outcome.duration_ms, 5000);
    }

    #[test]
    fn sequence_consumed_in_order_skipping_absent() {
        let mut engine = engine(4);
        engine.set_names(names(&["A", "B", "C", "D"]));
        engine.set_predetermined_order(names(&["D", "X", "A", "D"]));
        assert_eq!(spin_and_finish(&mut engine).winner, "D");
        assert_eq!(spin_and_finish(&mut engine).winner, "A");
        assert!(engine.tracker().is_consumed("D"));
        assert!(engine.tracker().is_consumed("A"));
    }

    #[test]
    fn predetermined_order_change_keeps_consumption() {
        let mut engine = engine(5);
        engine.set_names(names(&["A", "B", "C"]));
        engine.set_predetermined_order(names(&["B"]));
        assert_eq!(spin_and_finish(&mut engine).winner, "B");
        engine.set_predetermined_order(names(&["B", "C"]));
        assert_eq!(spin_and_finish(&mut engine).winner, "C");
    }

    #[test]
    fn scenario_overrides_stored_order() {
        let cfg = WheelConfig::default().with_scenarios(vec![ScenarioRule::new(4, "An")]);
        let mut engine = SelectionEngine::with_seed(&cfg, 6);
        engine.set_predetermined_order(names(&["B"]));
        engine.set_names(names(&["A", "B", "C", "An"]));
        assert_eq!(engine.active_order(), ["An"]);
        assert_eq!(spin_and_finish(&mut engine).winner, "An");
    }

    #[test]
    fn counter_advances_on_every_spin() {
        let cfg = WheelConfig::default().with_tracker(TrackerKind::Counter);
        let mut engine = SelectionEngine::with_seed(&cfg, 7);
        engine.set_names(names(&["A", "B", "C"]));
        engine.set_predetermined_order(names(&["C", "Z", "C"]));
        assert_eq!(spin_and_finish(&mut engine).winner, "C");
        let _ = spin_and_finish(&mut engine);
        // Counter flavour reuses a name at a later position.
        assert_eq!(spin_and_finish(&mut engine).winner, "C");
        assert_eq!(engine.tracker().position(), 3);
        engine.set_names(names(&["A", "B", "C", "D"]));
        assert_eq!(engine.tracker().position(), 3);
        engine.reset();
        assert_eq!(engine.tracker().position(), 0);
    }

    #[test]
    fn clearing_the_order_keeps_consumed_names_out() {
        let mut engine = engine(9);
        engine.set_names(names(&["A", "B", "C", "D"]));
        engine.set_predetermined_order(names(&["C"]));
        assert_eq!(spin_and_finish(&mut engine).winner, "C");
        engine.set_predetermined_order(Vec::new());
        assert!(engine.active_order().is_empty());
        let mut seen = [0usize; 4];
        for _ in 0..400 {
            seen[spin_and_finish(&mut engine).slot_index] += 1;
        }
        assert_eq!(seen[2], 0, "consumed C won again after the order was cleared");
        assert!(seen[0] > 0 && seen[1] > 0 && seen[3] > 0, "{seen:?}");
    }

    #[test]
    fn reset_clears_guard_and_consumption() {
        let mut engine = engine(8);
        engine.set_names(names(&["A", "B"]));
        engine.set_predetermined_order(names(&["A"]));
        assert_eq!(engine.spin().expect("spin").winner, "A");
        engine.reset();
        assert!(!engine.is_spinning());
        assert!(engine.tracker().is_fresh());
        assert_eq!(spin_and_finish(&mut engine).winner, "A");
    }
}
