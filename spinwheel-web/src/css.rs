//! Inline style strings for the wheel element and its labels.
use spinwheel_core::{LabelMetrics, WheelLayout};

/// Background shown while the wheel has no slots.
pub const EMPTY_WHEEL_BACKGROUND: &str = "#d0d0d0";

/// Class toggled on the wheel element while a spin animates.
pub const SPINNING_CLASS: &str = "spinning";

/// Class applied to every slot label.
pub const LABEL_CLASS: &str = "wheel-label";

#[must_use]
pub fn rotate_transform(rotation_deg: f64) -> String {
    format!("rotate({rotation_deg}deg)")
}

/// Transition for a spin of `duration_ms`; zero disables the transition.
#[must_use]
pub fn spin_transition(duration_ms: u32) -> String {
    if duration_ms == 0 {
        String::from("none")
    } else {
        format!("transform {duration_ms}ms ease-out")
    }
}

/// Conic gradient painting every slot; starts at 90deg so slot 0 begins at the indicator.
#[must_use]
pub fn conic_gradient(layout: &WheelLayout) -> String {
    if layout.is_empty() {
        return EMPTY_WHEEL_BACKGROUND.to_string();
    }
    let stops: Vec<String> = layout
        .segments
        .iter()
        .map(|segment| {
            format!(
                "{} {}deg {}deg",
                segment.color, segment.start_deg, segment.end_deg
            )
        })
        .collect();
    format!("conic-gradient(from 90deg, {})", stops.join(", "))
}

/// Places a label along its slot's centre line, centred in the text band.
#[must_use]
pub fn label_transform(label_angle_deg: f64, metrics: &LabelMetrics) -> String {
    format!(
        "rotate({label_angle_deg}deg) translate({}px, -50%) translateX(-50%)",
        metrics.text_center_px
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinwheel_core::Palette;

    #[test]
    fn empty_layout_uses_neutral_background() {
        assert_eq!(
            conic_gradient(&WheelLayout::default()),
            EMPTY_WHEEL_BACKGROUND
        );
    }

    #[test]
    fn gradient_lists_every_slot() {
        let names = vec![String::from("A"), String::from("B")];
        let layout = WheelLayout::compute(&names, &Palette::default());
        assert_eq!(
            conic_gradient(&layout),
            "conic-gradient(from 90deg, #3369e8 0deg 180deg, #009925 180deg 360deg)"
        );
    }

    #[test]
    fn transition_disabled_for_instant_moves() {
        assert_eq!(spin_transition(0), "none");
        assert_eq!(spin_transition(5000), "transform 5000ms ease-out");
        assert_eq!(rotate_transform(2385.5), "rotate(2385.5deg)");
    }
}
