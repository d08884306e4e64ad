// SPDX-License-Identifier: MIT

//!
//! Range lanes
//!

use crate::Range;
use log::trace;
use std::cmp::Ordering;
use vault_timeline_core::{DateError, EndDate};

/// Put each range (in chronological order) into the first lane that is free
/// when it starts.  A lane is free once its last range has ended strictly
/// before the new one starts, and is never freed by a range ending "now".
///
/// Returns the lane of each range, or `None` for ranges that didn't fit and
/// won't be drawn.
pub fn assign_lanes(
    ranges: &[Range<'_>],
    lane_count: usize,
) -> Result<Vec<Option<usize>>, DateError> {
    let mut lane_ends: Vec<Option<&EndDate>> = vec![None; lane_count];
    let mut lanes = Vec::with_capacity(ranges.len());

    for range in ranges {
        let mut found_lane = None;
        for (lane, lane_end) in lane_ends.iter().enumerate() {
            let is_free = match lane_end {
                None => true,
                Some(EndDate::Now) => false,
                Some(EndDate::Date(end)) => range.start.try_cmp(end)? == Ordering::Greater,
            };
            if is_free {
                found_lane = Some(lane);
                break;
            }
        }

        match found_lane {
            Some(lane) => lane_ends[lane] = Some(range.end),
            None => trace!("no free lane for `{}`, not drawing it", range.card.title),
        }
        lanes.push(found_lane);
    }

    Ok(lanes)
}
