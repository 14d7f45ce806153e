//! Outcome policies: how a spin picks its slot.
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::tracker::ConsumptionTracker;

/// Slot positions holding one name; most lists carry few duplicates.
pub type SlotPositions = SmallVec<[usize; 4]>;

/// A chosen slot plus the sequence name it satisfied, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub slot: usize,
    pub predetermined: Option<String>,
}

impl Selection {
    const fn random(slot: usize) -> Self {
        Self {
            slot,
            predetermined: None,
        }
    }
}

/// Strategy chosen per spin by the engine.
#[derive(Debug, Clone, Copy)]
pub enum OutcomePolicy<'a> {
    /// Uniform pick over every slot.
    Random,
    /// Walk the active sequence first, then pick uniformly among slots not yet consumed.
    Sequenced(SequencedPolicy<'a>),
}

impl OutcomePolicy<'_> {
    /// Pick a slot from `names`. Returns `None` only for an empty list.
    pub fn select<R: Rng + ?Sized>(&self, names: &[String], rng: &mut R) -> Option<Selection> {
        if names.is_empty() {
            return None;
        }
        match self {
            Self::Random => Some(Selection::random(rng.gen_range(0..names.len()))),
            Self::Sequenced(policy) => Some(
                policy
                    .select(names, rng)
                    .unwrap_or_else(|| Selection::random(policy.fallback_slot(names, rng))),
            ),
        }
    }
}

/// Predetermined sequence paired with its consumption state.
#[derive(Debug, Clone, Copy)]
pub struct SequencedPolicy<'a> {
    order: &'a [String],
    tracker: &'a ConsumptionTracker,
}

impl<'a> SequencedPolicy<'a> {
    #[must_use]
    pub const fn new(order: &'a [String], tracker: &'a ConsumptionTracker) -> Self {
        Self { order, tracker }
    }

    /// Whether `name` may still win through the sequence against `names`.
    #[must_use]
    pub fn is_eligible(&self, name: &str, names: &[String]) -> bool {
        !self.tracker.is_consumed(name) && names.iter().any(|candidate| candidate == name)
    }

    /// The sequence entry the next spin should land on, if any qualifies.
    #[must_use]
    pub fn next_name(&self, names: &[String]) -> Option<&'a str> {
        match self.tracker {
            ConsumptionTracker::NameSet(_) => self
                .order
                .iter()
                .find(|name| self.is_eligible(name, names))
                .map(String::as_str),
            ConsumptionTracker::Counter(position) => self
                .order
                .get(*position)
                .filter(|name| names.contains(*name))
                .map(String::as_str),
        }
    }

    /// Uniform pick over slots whose names have not been consumed. When every
    /// name is consumed the pick spans all slots.
    pub fn fallback_slot<R: Rng + ?Sized>(&self, names: &[String], rng: &mut R) -> usize {
        let open = names
            .iter()
            .filter(|name| !self.tracker.is_consumed(name))
            .count();
        if open == 0 {
            return rng.gen_range(0..names.len());
        }
        let pick = rng.gen_range(0..open);
        names
            .iter()
            .enumerate()
            .filter(|(_, name)| !self.tracker.is_consumed(name))
            .nth(pick)
            .map_or(0, |(index, _)| index)
    }

    fn select<R: Rng + ?Sized>(&self, names: &[String], rng: &mut R) -> Option<Selection> {
        let name = self.next_name(names)?;
        let positions = slot_positions(names, name);
        let slot = match self.tracker {
            ConsumptionTracker::NameSet(_) => positions.choose(rng).copied(),
            ConsumptionTracker::Counter(_) => positions.first().copied(),
        }?;
        Some(Selection {
            slot,
            predetermined: Some(name.to_string()),
        })
    }
}

/// Every slot index whose name equals `name`.
#[must_use]
pub fn slot_positions(names: &[String], name: &str) -> SlotPositions {
    names
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.as_str() == name)
        .map(|(index, _)| index)
        .collect()
}
