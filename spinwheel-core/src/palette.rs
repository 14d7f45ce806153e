//! Slot colour assignment.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Base four-colour cycle; the default palette repeats it three times.
pub const BASE_COLORS: [&str; 4] = ["#3369e8", "#009925", "#EEB211", "#d50f25"];

const DEFAULT_REPEATS: usize = 3;

/// Ordered colour list. Slot `i` is painted `colors[i mod len]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette, falling back to the default cycle when `colors` is empty.
    #[must_use]
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    #[must_use]
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for a slot index, wrapping around the palette.
    #[must_use]
    pub fn color_for(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return BASE_COLORS[index % BASE_COLORS.len()];
        }
        &self.colors[index % self.colors.len()]
    }

    /// Fisher-Yates shuffled copy; the palette itself is left untouched.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut shuffled = self.colors.clone();
        shuffled.shuffle(rng);
        shuffled
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = BASE_COLORS
            .iter()
            .cycle()
            .take(BASE_COLORS.len() * DEFAULT_REPEATS)
            .map(|c| (*c).to_string())
            .collect();
        Self { colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn default_palette_repeats_base_cycle() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 12);
        assert_eq!(palette.color_for(0), "#3369e8");
        assert_eq!(palette.color_for(3), "#d50f25");
        assert_eq!(palette.color_for(4), "#3369e8");
        assert_eq!(palette.color_for(13), "#009925");
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        assert_eq!(Palette::new(Vec::new()), Palette::default());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let palette = Palette::new(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        let mut rng = SmallRng::seed_from_u64(9);
        let mut shuffled = palette.shuffled(&mut rng);
        assert_eq!(palette.colors(), ["a", "b", "c", "d"]);
        shuffled.sort();
        assert_eq!(shuffled, ["a", "b", "c", "d"]);
    }
}
