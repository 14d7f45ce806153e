use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spinwheel_core::{
    RotationCalculator, ScenarioRule, SelectionEngine, SpinOutcome, TrackerKind, Wheel,
    WheelConfig, remove_first, slot_under_pointer,
};

use crate::util::split_csv;

const SENTINEL: &str = "An";
const FALLBACK_SPINS: usize = 500;
const ROTATION_SPINS: usize = 25;

/// Checks one seeded session; an error describes the first broken expectation.
pub type Expectation = fn(u64) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    check: Expectation,
}

impl Scenario {
    const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        check: Expectation,
    ) -> Self {
        Self {
            key,
            name,
            description,
            check,
        }
    }

    /// Run the session for `seed`.
    ///
    /// # Errors
    /// Returns the first expectation the session broke.
    pub fn run(&self, seed: u64) -> Result<()> {
        (self.check)(seed)
    }
}

pub fn catalog() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "predetermined-order",
            "Predetermined Order",
            "Sequenced names win in order, then never again",
            predetermined_order_expectation,
        ),
        Scenario::new(
            "sentinel-scenario",
            "Sentinel Scenario",
            "Four names including the sentinel force the sentinel to win",
            sentinel_scenario_expectation,
        ),
        Scenario::new(
            "uniform-fallback",
            "Uniform Fallback",
            "Plain random spins reach every slot",
            uniform_fallback_expectation,
        ),
        Scenario::new(
            "rotation-bounds",
            "Rotation Bounds",
            "Every spin turns forward by the minimum plus less than a turn and lands on the winner",
            rotation_bounds_expectation,
        ),
        Scenario::new(
            "remove-winner-session",
            "Remove Winner Session",
            "Removing each winner walks the sequence and then drains the wheel",
            remove_winner_session_expectation,
        ),
        Scenario::new(
            "readd-restart",
            "Re-add Restart",
            "Restoring the full list restarts the sequence",
            readd_restart_expectation,
        ),
        Scenario::new(
            "counter-tracker",
            "Counter Tracker",
            "Counter tracking ignores list edits until reset",
            counter_tracker_expectation,
        ),
    ]
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub fn get_scenario(key: &str) -> Option<Scenario> {
    let key = key.to_lowercase();
    catalog().into_iter().find(|scenario| scenario.key == key)
}

/// Split the `--scenarios` argument, replacing `all` with every catalog key.
pub fn expand_scenarios(arg: &str) -> Vec<String> {
    let mut keys = split_csv(arg);
    if keys.iter().any(|key| key == "all") {
        keys.retain(|key| key != "all");
        keys.extend(catalog().iter().map(|scenario| scenario.key.to_string()));
    }
    keys
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| (*name).to_string()).collect()
}

fn spin_once(engine: &mut SelectionEngine) -> Result<SpinOutcome> {
    let outcome = engine
        .spin()
        .context("spin refused on a populated, idle wheel")?;
    engine.finish_spin();
    Ok(outcome)
}

fn expect_winner(engine: &mut SelectionEngine, expected: &str) -> Result<()> {
    let outcome = spin_once(engine)?;
    anyhow::ensure!(
        outcome.winner == expected,
        "expected {expected} to win, got {} (slot {})",
        outcome.winner,
        outcome.slot_index
    );
    Ok(())
}

fn predetermined_order_expectation(seed: u64) -> Result<()> {
    let mut engine = SelectionEngine::with_seed(&WheelConfig::default(), seed);
    engine.set_names(names(&["A", "B", "C", "D", "E", "F"]));
    let order = names(&["D", "B", "F"]);
    engine.set_predetermined_order(order.clone());

    let first = engine.spin().context("first spin refused")?;
    anyhow::ensure!(first.winner == "D", "first winner was {}", first.winner);
    anyhow::ensure!(
        engine.spin().is_none(),
        "second spin accepted while the first was in flight"
    );
    engine.finish_spin();

    expect_winner(&mut engine, "B")?;
    expect_winner(&mut engine, "F")?;
    for spin in 0..FALLBACK_SPINS {
        let outcome = spin_once(&mut engine)?;
        anyhow::ensure!(
            !order.contains(&outcome.winner),
            "consumed name {} won again on fallback spin {}",
            outcome.winner,
            spin + 1
        );
    }
    Ok(())
}

fn sentinel_scenario_expectation(seed: u64) -> Result<()> {
    let cfg = WheelConfig::default().with_scenarios(vec![ScenarioRule::new(4, SENTINEL)]);
    let mut engine = SelectionEngine::with_seed(&cfg, seed);
    let mut list = names(&["Bo", SENTINEL, "Cy", "Di"]);
    list.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    engine.set_names(list.clone());
    engine.set_predetermined_order(names(&["Cy"]));

    expect_winner(&mut engine, SENTINEL)?;

    anyhow::ensure!(
        remove_first(&mut list, SENTINEL),
        "sentinel missing from the list"
    );
    engine.set_names(list);
    expect_winner(&mut engine, "Cy")
}

fn uniform_fallback_expectation(seed: u64) -> Result<()> {
    let mut engine = SelectionEngine::with_seed(&WheelConfig::default(), seed);
    engine.set_names(names(&["A", "B", "C", "D", "E"]));
    let mut hits = [0usize; 5];
    for _ in 0..FALLBACK_SPINS {
        let outcome = spin_once(&mut engine)?;
        let slot = hits
            .get_mut(outcome.slot_index)
            .with_context(|| format!("slot {} out of range", outcome.slot_index))?;
        *slot += 1;
    }
    // Half the expected share; a fair wheel misses this by over five sigma.
    let floor = FALLBACK_SPINS / hits.len() / 2;
    for (slot, count) in hits.iter().enumerate() {
        anyhow::ensure!(
            *count >= floor,
            "slot {slot} won {count} of {FALLBACK_SPINS} spins"
        );
    }
    Ok(())
}

fn rotation_bounds_expectation(seed: u64) -> Result<()> {
    let cfg = WheelConfig::default();
    let min_spin = RotationCalculator::from_config(&cfg).min_spin_distance();
    let size = ChaCha8Rng::seed_from_u64(seed).gen_range(1..=24);
    let mut wheel = Wheel::new(&cfg, seed, ());
    wheel.set_names((0..size).map(|i| format!("P{i}")).collect());

    let mut previous = wheel.rotation();
    for spin in 0..ROTATION_SPINS {
        let outcome = wheel.spin().context("wheel refused to spin")?;
        let delta = wheel.rotation() - previous;
        anyhow::ensure!(
            delta >= min_spin - 1e-9 && delta < min_spin + 360.0,
            "spin {} of a {size}-slot wheel turned {delta:.3} degrees",
            spin + 1
        );
        let landed = slot_under_pointer(wheel.rotation(), size);
        anyhow::ensure!(
            landed == Some(outcome.slot_index),
            "pointer rests on {landed:?} but slot {} won",
            outcome.slot_index
        );
        previous = wheel.rotation();
        wheel.finish_spin();
    }
    wheel.reset();
    anyhow::ensure!(
        wheel.rotation().abs() < f64::EPSILON,
        "reset left rotation at {}",
        wheel.rotation()
    );
    Ok(())
}

fn remove_winner_session_expectation(seed: u64) -> Result<()> {
    let mut engine = SelectionEngine::with_seed(&WheelConfig::default(), seed);
    let mut list = names(&["A", "B", "C", "D", "E", "F"]);
    engine.set_names(list.clone());
    engine.set_predetermined_order(names(&["F", "B", "D"]));

    let mut winners = Vec::new();
    while !list.is_empty() {
        let outcome = spin_once(&mut engine)?;
        anyhow::ensure!(
            remove_first(&mut list, &outcome.winner),
            "winner {} was not on the list",
            outcome.winner
        );
        winners.push(outcome.winner);
        engine.set_names(list.clone());
    }
    anyhow::ensure!(
        winners.starts_with(&names(&["F", "B", "D"])),
        "sequence broken: {winners:?}"
    );
    anyhow::ensure!(winners.len() == 6, "drained in {} spins", winners.len());
    anyhow::ensure!(engine.spin().is_none(), "empty wheel accepted a spin");
    Ok(())
}

fn readd_restart_expectation(seed: u64) -> Result<()> {
    let mut engine = SelectionEngine::with_seed(&WheelConfig::default(), seed);
    let full = names(&["A", "B", "C", "D"]);
    engine.set_names(full.clone());
    engine.set_predetermined_order(names(&["B", "C"]));
    expect_winner(&mut engine, "B")?;
    engine.set_names(names(&["A", "C", "D"]));
    expect_winner(&mut engine, "C")?;
    engine.set_names(full);
    expect_winner(&mut engine, "B")
}

fn counter_tracker_expectation(seed: u64) -> Result<()> {
    let cfg = WheelConfig::default().with_tracker(TrackerKind::Counter);
    let mut engine = SelectionEngine::with_seed(&cfg, seed);
    engine.set_names(names(&["A", "B", "C", "D"]));
    engine.set_predetermined_order(names(&["D", "A"]));
    expect_winner(&mut engine, "D")?;
    engine.set_names(names(&["A", "B", "C", "D", "E"]));
    expect_winner(&mut engine, "A")?;
    engine.reset();
    expect_winner(&mut engine, "D")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_scenario_passes_for_a_few_seeds() {
        for scenario in catalog() {
            for seed in [1, 42, 1337] {
                scenario
                    .run(seed)
                    .unwrap_or_else(|err| panic!("{} seed {seed}: {err:#}", scenario.key));
            }
        }
    }

    #[test]
    fn expand_all_adds_every_key_once() {
        let keys = expand_scenarios("all");
        assert_eq!(keys.len(), catalog().len());
        assert!(keys.contains(&"rotation-bounds".to_string()));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get_scenario("Predetermined-Order").is_some());
        assert!(get_scenario("nope").is_none());
    }
}
