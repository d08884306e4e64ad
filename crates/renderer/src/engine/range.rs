// SPDX-License-Identifier: MIT

//!
//! Range geometry
//!
//! A range runs from the top of its card down to the position of its end date.
//! Dates have no fixed scale, so the end position is found by interpolating
//! between the cards whose start dates surround the end date.
//!

use crate::{CardLayout, inverse_lerp, lerp};
use log::{debug, trace, warn};
use std::cmp::Ordering;
use vault_timeline_core::{
    AbstractDate, CardContent, DateError, EndDate, ensure_same_segment_count,
};

/// A card's range, positioned relative to the top of the timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Range<'a> {
    pub card: &'a CardContent,

    /// The card's index in the sorted collection
    pub index: usize,

    pub start: &'a AbstractDate,
    pub end: &'a EndDate,

    /// The top of the card (where the range starts)
    pub card_relative_top_position: f64,

    /// Where the range ends
    pub target_position: f64,
}

impl Range<'_> {
    pub fn height_px(&self) -> f64 {
        self.target_position - self.card_relative_top_position
    }
}

/// A card the end of a range is interpolated from
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Boundary<'a> {
    pub date: &'a AbstractDate,
    pub top_px: f64,
}

/// Compute the ranges of a sorted collection of cards.
///
/// `layouts[i]` is the measured position of `cards[i]`.  Cards without both
/// dates, or that end before they start, have no range.  Fails if the cards'
/// dates don't all have the same number of segments.
pub fn compute_ranges<'a>(
    cards: &'a [CardContent],
    layouts: &[CardLayout],
    timeline_height: f64,
) -> Result<Vec<Range<'a>>, DateError> {
    debug!(
        "computing ranges for {} cards (timeline height {timeline_height})",
        cards.len()
    );
    ensure_same_segment_count(cards.iter().flat_map(CardContent::concrete_dates))?;

    let mut ranges = Vec::new();
    for (index, card) in cards.iter().enumerate() {
        let (Some(start), Some(end)) = (&card.start_date, &card.end_date) else {
            continue;
        };
        if !card.is_rangeable()? {
            trace!("`{}` ends before it starts, no range", card.title);
            continue;
        }
        let Some(layout) = layouts.get(index) else {
            warn!("no layout for card {index} (`{}`), skipping its range", card.title);
            continue;
        };

        let target_position = match end {
            EndDate::Now => timeline_height,
            EndDate::Date(end) => find_end_position_for_date(
                end,
                &cards[index..],
                &layouts[index..],
                timeline_height,
            )?,
        };

        ranges.push(Range {
            card,
            index,
            start,
            end,
            card_relative_top_position: layout.top_px,
            target_position,
        });
    }

    debug!("{} ranges computed", ranges.len());
    Ok(ranges)
}

/// Find the position of a date by interpolating between the cards around it.
///
/// `cards` starts at the card the range belongs to (earlier cards can't bound
/// its end).  Falls back to the bottom of the timeline when there aren't cards
/// on both sides of the date.
pub fn find_end_position_for_date(
    date: &AbstractDate,
    cards: &[CardContent],
    layouts: &[CardLayout],
    timeline_height: f64,
) -> Result<f64, DateError> {
    if cards.len() <= 1 {
        return Ok(timeline_height);
    }

    let Some((lower, upper)) = find_boundaries(date, cards, layouts)? else {
        trace!("no boundaries around {date}, extending to the bottom");
        return Ok(timeline_height);
    };

    let [a, b, value] = in_lerp_values(lower.date, upper.date, date)?;
    Ok(lerp(lower.top_px, upper.top_px, inverse_lerp(a, b, value)))
}

/// Find the cards just before (lower) and just after (upper) a date.
///
/// The upper boundary is the first card starting after the date.  The lower
/// boundary is the first of the cards sharing the latest start date that
/// isn't after the date.  If that card isn't one of the first two and doesn't
/// start exactly on the date, its bottom edge is used instead of its top.
pub(crate) fn find_boundaries<'a>(
    date: &AbstractDate,
    cards: &'a [CardContent],
    layouts: &[CardLayout],
) -> Result<Option<(Boundary<'a>, Boundary<'a>)>, DateError> {
    let mut first_over: Option<(usize, &AbstractDate)> = None;
    let mut last_under: Option<&AbstractDate> = None;
    for (index, card) in cards.iter().enumerate() {
        let Some(start) = &card.start_date else {
            continue;
        };
        match start.try_cmp(date)? {
            Ordering::Greater => {
                if first_over.is_none() {
                    first_over = Some((index, start));
                }
            }
            _ => last_under = Some(start),
        }
    }

    let (Some((upper_index, upper_date)), Some(lower_date)) = (first_over, last_under) else {
        return Ok(None);
    };

    // Anchor on the first card of a run sharing the same start date
    let Some(lower_index) = cards
        .iter()
        .position(|card| card.start_date.as_ref() == Some(lower_date))
    else {
        return Ok(None);
    };

    let (Some(lower_layout), Some(upper_layout)) =
        (layouts.get(lower_index), layouts.get(upper_index))
    else {
        trace!("boundary cards {lower_index} and {upper_index} aren't all measured");
        return Ok(None);
    };

    let lower_top_px = if lower_index > 1 && lower_date != date {
        lower_layout.bottom_px()
    } else {
        lower_layout.top_px
    };

    Ok(Some((
        Boundary {
            date: lower_date,
            top_px: lower_top_px,
        },
        Boundary {
            date: upper_date,
            top_px: upper_layout.top_px,
        },
    )))
}

/// The values to interpolate a date between two others with.  Uses the most
/// significant segment in which the two boundary dates differ (or `[0, 1, 1]`
/// if they're equal).
pub(crate) fn in_lerp_values(
    lower: &AbstractDate,
    upper: &AbstractDate,
    date: &AbstractDate,
) -> Result<[f64; 3], DateError> {
    ensure_same_segment_count([lower, upper, date])?;
    Ok(lower
        .segments()
        .iter()
        .zip(upper.segments())
        .zip(date.segments())
        .find(|((a, b), _)| a != b)
        .map(|((a, b), value)| [*a as f64, *b as f64, *value as f64])
        .unwrap_or([0.0, 1.0, 1.0]))
}
