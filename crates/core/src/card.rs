// SPDX-License-Identifier: MIT

//!
//! The content of a timeline card
//!

use crate::{AbstractDate, DateError, EndDate, compare_abstract_dates, ensure_same_segment_count};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Everything displayed on one timeline card.  Built fresh on every render
/// pass and never modified afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CardContent {
    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default, rename = "imageURL", alias = "imageUrl")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub start_date: Option<AbstractDate>,

    #[serde(default)]
    pub end_date: Option<EndDate>,
}

impl CardContent {
    /// Create a card with only a title and dates
    pub fn new<S: ToString>(
        title: S,
        start_date: Option<AbstractDate>,
        end_date: Option<EndDate>,
    ) -> Self {
        Self {
            title: title.to_string(),
            body: None,
            image_url: None,
            start_date,
            end_date,
        }
    }

    /// Whether a range can be drawn for this card: it needs both dates, and
    /// must not end before it starts
    pub fn is_rangeable(&self) -> Result<bool, DateError> {
        let (Some(start), Some(end)) = (&self.start_date, &self.end_date) else {
            return Ok(false);
        };
        Ok(end.as_point().try_cmp(&start.as_point())? != Ordering::Less)
    }

    /// All the card's concrete dates ("now" is skipped)
    pub fn concrete_dates(&self) -> impl Iterator<Item = &AbstractDate> {
        self.start_date
            .iter()
            .chain(self.end_date.iter().filter_map(EndDate::as_date))
    }
}

/// Order cards by start date, then end date, then title
pub fn compare_cards(a: &CardContent, b: &CardContent) -> Result<Ordering, DateError> {
    let by_start = compare_abstract_dates(
        a.start_date.as_ref().map(AbstractDate::as_point),
        b.start_date.as_ref().map(AbstractDate::as_point),
    )?;
    let by_end = compare_abstract_dates(
        a.end_date.as_ref().map(EndDate::as_point),
        b.end_date.as_ref().map(EndDate::as_point),
    )?;
    Ok(by_start.then(by_end).then_with(|| a.title.cmp(&b.title)))
}

/// Sort cards chronologically (stable).  Fails if the cards' dates don't all
/// have the same number of segments.
pub fn sort_cards(cards: &mut [CardContent]) -> Result<(), DateError> {
    ensure_same_segment_count(cards.iter().flat_map(CardContent::concrete_dates))?;
    debug!("sorting {} cards", cards.len());

    // Every comparison succeeds once the segment counts are known to match
    cards.sort_by(|a, b| compare_cards(a, b).unwrap_or(Ordering::Equal));
    Ok(())
}
