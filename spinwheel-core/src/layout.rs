//! Slot geometry handed to render observers.
//!
//! Angles are measured clockwise from the indicator on the unrotated wheel.
use serde::{Deserialize, Serialize};

use crate::numbers::usize_to_f64;
use crate::palette::Palette;
use crate::rotation::segment_angle;

const MIN_HUB_RADIUS_PX: f64 = 25.0;
const HUB_RADIUS_RATIO: f64 = 0.14;
const HUB_GAP_PX: f64 = 5.0;
const OUTER_TEXT_RATIO: f64 = 0.95;
const IDEAL_FONT_RATIO: f64 = 0.17;
const ARC_FONT_RATIO: f64 = 0.75;
const MIN_FONT_PX: f64 = 20.0;
const LABEL_WIDTH_RATIO: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub index: usize,
    pub name: String,
    pub color: String,
    pub start_deg: f64,
    pub end_deg: f64,
    /// Direction the label points, through the middle of the slot.
    pub label_angle_deg: f64,
}

/// Sizing for slot labels on a wheel of a given radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMetrics {
    pub hub_radius_px: f64,
    /// Distance from the centre to the middle of the text band.
    pub text_center_px: f64,
    pub max_width_px: f64,
    pub font_size_px: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelLayout {
    pub segment_angle_deg: f64,
    pub segments: Vec<Segment>,
}

impl WheelLayout {
    #[must_use]
    pub fn compute(names: &[String], palette: &Palette) -> Self {
        let Some(segment) = segment_angle(names.len()) else {
            return Self::default();
        };
        let segments = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let start_deg = usize_to_f64(index) * segment;
                Segment {
                    index,
                    name: name.clone(),
                    color: palette.color_for(index).to_string(),
                    start_deg,
                    end_deg: start_deg + segment,
                    label_angle_deg: start_deg + segment / 2.0,
                }
            })
            .collect();
        Self {
            segment_angle_deg: segment,
            segments,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Label sizing for a wheel of `radius_px`; `None` for an empty wheel.
    ///
    /// Font size shrinks from the ideal only when the chord through the text
    /// band gets too narrow, and never below the minimum.
    #[must_use]
    pub fn label_metrics(&self, radius_px: f64) -> Option<LabelMetrics> {
        if self.is_empty() {
            return None;
        }
        let hub_radius_px = MIN_HUB_RADIUS_PX.max(radius_px * HUB_RADIUS_RATIO);
        let inner = hub_radius_px + HUB_GAP_PX;
        let outer = radius_px * OUTER_TEXT_RATIO;
        let text_center_px = (inner + outer) / 2.0;
        let half_segment_rad = (self.segment_angle_deg / 2.0).to_radians();
        let chord = text_center_px * 2.0 * half_segment_rad.sin();
        let ideal = radius_px * IDEAL_FONT_RATIO;
        let font_size_px = MIN_FONT_PX.max(ideal.min(chord * ARC_FONT_RATIO));
        Some(LabelMetrics {
            hub_radius_px,
            text_center_px,
            max_width_px: (outer - inner) * LABEL_WIDTH_RATIO,
            font_size_px,
        })
    }
}
