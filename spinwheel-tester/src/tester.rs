use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenarios::Scenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct SessionTester {
    verbose: bool,
}

impl SessionTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|&seed| {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seed: {seed})",
                        scenario.name.bright_white()
                    );
                }
                self.run_single_scenario(scenario, seed, iterations)
            })
            .collect()
    }

    fn run_single_scenario(
        &self,
        scenario: &Scenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut total = Duration::ZERO;

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let start_time = Instant::now();
            let outcome = scenario.run(iteration_seed);
            total += start_time.elapsed();

            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{iterations} failed: {}",
                            i + 1,
                            format!("{err:#}").red()
                        );
                    }
                    log::debug!("{} seed {iteration_seed}: {err:#}", scenario.key);
                    failures.push(format!(
                        "Iteration {} (seed {iteration_seed}): {err:#}",
                        i + 1
                    ));
                }
            }
        }

        let average_duration = if iterations == 0 {
            Duration::ZERO
        } else {
            total / u32::try_from(iterations).unwrap_or(u32::MAX)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::get_scenario;

    #[test]
    fn one_result_per_seed() {
        let scenario = get_scenario("readd-restart").expect("known scenario");
        let results = SessionTester::new(false).run_scenario(&scenario, &[1, 2, 3], 2);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed && r.successful_iterations == 2));
        assert_eq!(results[1].seed, 2);
    }

    #[test]
    fn zero_iterations_pass_vacuously() {
        let scenario = get_scenario("uniform-fallback").expect("known scenario");
        let results = SessionTester::new(false).run_scenario(&scenario, &[9], 0);
        assert!(results[0].passed);
        assert_eq!(results[0].average_duration, Duration::ZERO);
    }

    #[test]
    fn result_serializes_duration_as_micros() {
        let result = ScenarioResult {
            scenario_name: "Rotation Bounds".to_string(),
            seed: 7,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(1500),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["average_duration"], 1500);
        let back: ScenarioResult = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.average_duration, Duration::from_micros(1500));
    }
}
