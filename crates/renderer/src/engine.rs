// SPDX-License-Identifier: MIT

//!
//! Engine
//!

mod colours;
mod helpers;
mod lanes;
mod layout_params;
mod range;

pub(crate) use helpers::*;

pub use colours::*;
pub use lanes::*;
pub use layout_params::*;
pub use range::*;

use log::debug;
use serde::Serialize;
use vault_timeline_core::{CardContent, DateError};

/// Information needed to draw one range bar (for use outside of the engine)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeOut {
    /// The index of the range's card in the sorted collection
    pub card_index: usize,

    /// The top of the card, relative to the top of the timeline
    pub top_px: f64,

    pub height_px: f64,
    pub lane: usize,

    /// The distance from the left of the gutter
    pub left_px: f64,

    pub colour: RangeColour,
}

/// The core `vault-timeline-renderer` engine.  Turns sorted cards and their
/// measured layout into the range bars drawn next to them.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    /// The lane count and width
    layout_params: RangeLayoutParams,
}

impl Engine {
    /// Create a new engine
    pub fn new(layout_params: RangeLayoutParams) -> Self {
        Self { layout_params }
    }

    pub fn layout_params(&self) -> RangeLayoutParams {
        self.layout_params
    }

    pub fn set_layout_params(&mut self, layout_params: RangeLayoutParams) {
        debug!("engine set layout params {layout_params:?}");
        self.layout_params = layout_params;
    }

    /// Get all information needed to draw the ranges of a sorted collection of
    /// cards.  `layouts[i]` is the measured position of `cards[i]`.  Ranges
    /// that don't fit in a lane are left out.
    pub fn ranges_for_drawing(
        &self,
        cards: &[CardContent],
        layouts: &[CardLayout],
        timeline_height: f64,
    ) -> Result<Vec<RangeOut>, DateError> {
        let ranges = compute_ranges(cards, layouts, timeline_height)?;
        let lanes = assign_lanes(&ranges, self.layout_params.effective_lane_count())?;

        let ranges_out: Vec<RangeOut> = ranges
            .iter()
            .zip(lanes)
            .filter_map(|(range, lane)| {
                let lane = lane?;
                Some(RangeOut {
                    card_index: range.index,
                    top_px: range.card_relative_top_position,
                    height_px: range.height_px(),
                    lane,
                    left_px: self.layout_params.lane_left_px(lane),
                    colour: RangeColour::for_lane(lane)?,
                })
            })
            .collect();

        debug!("drawing {} of {} ranges", ranges_out.len(), ranges.len());
        Ok(ranges_out)
    }
}
