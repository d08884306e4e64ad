// SPDX-License-Identifier: MIT

//!
//! Layout params
//!

use crate::RangeColour;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Layout parameters for the range lanes in the timeline's gutter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeLayoutParams {
    /// How many ranges can be drawn side by side.  Capped at the size of the
    /// colour palette.
    pub lane_count: usize,

    pub lane_width_px: f64,
}

impl Default for RangeLayoutParams {
    fn default() -> Self {
        RangeLayoutParams {
            lane_count: RangeColour::ALL.len(),
            lane_width_px: 12.0,
        }
    }
}

impl RangeLayoutParams {
    /// The number of lanes actually available
    pub fn effective_lane_count(&self) -> usize {
        self.lane_count.min(RangeColour::ALL.len())
    }

    /// The distance of a lane from the left of the gutter
    pub fn lane_left_px(&self, lane: usize) -> f64 {
        lane as f64 * self.lane_width_px
    }
}

/// The measured position of a rendered card, relative to the top of the
/// timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLayout {
    pub top_px: f64,
    pub height_px: f64,
}

impl CardLayout {
    /// The bottom edge of the card
    pub fn bottom_px(&self) -> f64 {
        self.top_px + self.height_px
    }
}
