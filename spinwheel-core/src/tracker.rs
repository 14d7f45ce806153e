//! Consumption tracking for the predetermined sequence.
//!
//! Two flavours exist: a set of names that already won (`NameSet`), and a
//! plain position counter into the sequence (`Counter`). Only the name set
//! resets itself when the candidate list changes shape.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::scenario::ScenarioSet;

/// Which consumption flavour an engine uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerKind {
    #[default]
    NameSet,
    Counter,
}

/// Why the name-set tracker was cleared on a list replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Names were added back and the sequence or a scenario is in play.
    NamesReadded,
    /// A scenario rule matches now but did not before.
    ScenarioEntered,
    /// The full sequence was present and no longer is.
    SequenceBroken,
    /// The full sequence is present again after being incomplete.
    SequenceRestored,
}

/// Order-independent fingerprint of a candidate list's multiset of names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSignature(u64);

impl NameSignature {
    #[must_use]
    pub fn of(names: &[String]) -> Self {
        let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        let mut hasher = XxHash64::with_seed(0);
        for name in sorted {
            hasher.write(name.as_bytes());
            hasher.write_u8(0xFF);
        }
        Self(hasher.finish())
    }
}

/// Facts about one candidate list that drive the reset rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSnapshot {
    pub len: usize,
    pub signature: NameSignature,
    pub full_sequence_present: bool,
    pub scenario_active: bool,
}

impl ListSnapshot {
    #[must_use]
    pub fn capture(names: &[String], order: &[String], scenarios: &ScenarioSet) -> Self {
        Self {
            len: names.len(),
            signature: NameSignature::of(names),
            full_sequence_present: full_sequence_present(names, order),
            scenario_active: scenarios.is_active(names),
        }
    }
}

/// True when `order` is non-empty and every entry appears in `names`.
#[must_use]
pub fn full_sequence_present(names: &[String], order: &[String]) -> bool {
    !order.is_empty() && order.iter().all(|wanted| names.contains(wanted))
}

/// Decide whether replacing `before` with `after` clears the name set.
#[must_use]
pub fn reset_reason(before: &ListSnapshot, after: &ListSnapshot) -> Option<ResetReason> {
    // A longer list never shares the old signature; the length check decides alone.
    let readded = after.len > before.len && after.signature != before.signature;
    if readded && (after.full_sequence_present || after.scenario_active) {
        return Some(ResetReason::NamesReadded);
    }
    if after.scenario_active && !before.scenario_active {
        return Some(ResetReason::ScenarioEntered);
    }
    if before.full_sequence_present && !after.full_sequence_present {
        return Some(ResetReason::SequenceBroken);
    }
    if after.full_sequence_present && !before.full_sequence_present {
        return Some(ResetReason::SequenceRestored);
    }
    None
}

/// Record of how much of the predetermined sequence has been used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumptionTracker {
    NameSet(HashSet<String>),
    Counter(usize),
}

impl ConsumptionTracker {
    #[must_use]
    pub fn new(kind: TrackerKind) -> Self {
        match kind {
            TrackerKind::NameSet => Self::NameSet(HashSet::new()),
            TrackerKind::Counter => Self::Counter(0),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TrackerKind {
        match self {
            Self::NameSet(_) => TrackerKind::NameSet,
            Self::Counter(_) => TrackerKind::Counter,
        }
    }

    /// Whether `name` already won through the sequence. Counters never track names.
    #[must_use]
    pub fn is_consumed(&self, name: &str) -> bool {
        match self {
            Self::NameSet(used) => used.contains(name),
            Self::Counter(_) => false,
        }
    }

    /// Sequence position for the counter flavour; always 0 for the name set.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::NameSet(_) => 0,
            Self::Counter(position) => *position,
        }
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        match self {
            Self::NameSet(used) => used.is_empty(),
            Self::Counter(position) => *position == 0,
        }
    }

    /// Record a finished selection. `predetermined` is the sequence name that
    /// won, if any; the counter advances on every spin regardless.
    pub fn record(&mut self, predetermined: Option<&str>) {
        match self {
            Self::NameSet(used) => {
                if let Some(name) = predetermined {
                    used.insert(name.to_string());
                }
            }
            Self::Counter(position) => *position = position.saturating_add(1),
        }
    }

    pub fn clear(&mut self) {
        match self {
            Self::NameSet(used) => used.clear(),
            Self::Counter(position) => *position = 0,
        }
    }

    /// Apply the list-replacement rules. Returns the reason when the tracker was cleared.
    pub fn on_names_replaced(
        &mut self,
        before: &ListSnapshot,
        after: &ListSnapshot,
    ) -> Option<ResetReason> {
        if matches!(self, Self::Counter(_)) {
            return None;
        }
        let reason = reset_reason(before, after)?;
        self.clear();
        Some(reason)
    }
}
