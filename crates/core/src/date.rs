// SPDX-License-Identifier: MIT

//!
//! The abstract date type
//!
//! An [`AbstractDate`] is an ordered tuple of integer segments whose meaning
//! (e.g. `year,month,day` or `cycle,moon,phase,day`) is defined by the
//! timeline's settings rather than by any real calendar.  Dates are compared
//! lexicographically, most significant segment first.
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors that can arise in relation to an [`AbstractDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Two dates of different lengths were compared.  All dates on one
    /// timeline must share the same segments.
    #[error("Cannot compare a date with {left} segments against one with {right} segments")]
    SegmentCountMismatch { left: usize, right: usize },
}

/// An ordered tuple of integers representing a point in an arbitrary calendar
#[derive(derive_more::Index, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AbstractDate(Vec<i64>);

impl AbstractDate {
    /// Create a date from its segments (most significant first)
    pub fn new(segments: Vec<i64>) -> Self {
        Self(segments)
    }

    /// Get the date's segments
    pub fn segments(&self) -> &[i64] {
        &self.0
    }

    /// Get a single segment if the date has one at that index
    pub fn get(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }

    /// The number of segments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare two dates segment by segment.  Dates of different lengths are
    /// not comparable.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, DateError> {
        if self.len() != other.len() {
            return Err(DateError::SegmentCountMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(self.0.cmp(&other.0))
    }

    /// Borrow the date as a [`DatePoint`]
    pub fn as_point(&self) -> DatePoint<'_> {
        DatePoint::Date(self)
    }
}

impl From<Vec<i64>> for AbstractDate {
    fn from(value: Vec<i64>) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<[i64; N]> for AbstractDate {
    fn from(value: [i64; N]) -> Self {
        Self(value.to_vec())
    }
}

impl fmt::Display for AbstractDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<String> = self.0.iter().map(|segment| segment.to_string()).collect();
        write!(f, "{}", segments.join("-"))
    }
}

/// The end of an event: either a concrete date, or "now" for events that are
/// still ongoing.  "Now" sorts after every concrete date.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EndDate {
    Date(AbstractDate),
    Now,
}

impl EndDate {
    /// Borrow the end date as a [`DatePoint`]
    pub fn as_point(&self) -> DatePoint<'_> {
        match self {
            EndDate::Date(date) => DatePoint::Date(date),
            EndDate::Now => DatePoint::Now,
        }
    }

    /// Get the concrete date (if it isn't "now")
    pub fn as_date(&self) -> Option<&AbstractDate> {
        match self {
            EndDate::Date(date) => Some(date),
            EndDate::Now => None,
        }
    }

    pub fn is_now(&self) -> bool {
        matches!(self, EndDate::Now)
    }
}

impl From<AbstractDate> for EndDate {
    fn from(value: AbstractDate) -> Self {
        EndDate::Date(value)
    }
}

impl Serialize for EndDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            EndDate::Date(date) => date.serialize(serializer),
            EndDate::Now => serializer.serialize_bool(true),
        }
    }
}

/// Used only by the custom deserialiser (`true` or a list of segments)
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEndDate {
    Now(bool),
    Date(AbstractDate),
}

impl<'de> Deserialize<'de> for EndDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawEndDate::deserialize(deserializer)? {
            RawEndDate::Now(true) => Ok(EndDate::Now),
            RawEndDate::Now(false) => Err(serde::de::Error::custom(
                "an end date must be a list of segments or `true`",
            )),
            RawEndDate::Date(date) => Ok(EndDate::Date(date)),
        }
    }
}

/// A borrowed view over anything that can sit on the timeline axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatePoint<'a> {
    Date(&'a AbstractDate),
    Now,
}

impl DatePoint<'_> {
    /// "Now" is later than every concrete date, and equal to itself
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, DateError> {
        match (self, other) {
            (DatePoint::Now, DatePoint::Now) => Ok(Ordering::Equal),
            (DatePoint::Now, DatePoint::Date(_)) => Ok(Ordering::Greater),
            (DatePoint::Date(_), DatePoint::Now) => Ok(Ordering::Less),
            (DatePoint::Date(a), DatePoint::Date(b)) => a.try_cmp(b),
        }
    }
}

/// Compare two optional dates.
///
/// Missing dates sort before everything else (so events without a start date
/// come first), "now" sorts after every concrete date, and concrete dates
/// compare segment by segment.
pub fn compare_abstract_dates(
    a: Option<DatePoint<'_>>,
    b: Option<DatePoint<'_>>,
) -> Result<Ordering, DateError> {
    match (a, b) {
        (None, None) => Ok(Ordering::Equal),
        (None, Some(_)) => Ok(Ordering::Less),
        (Some(_), None) => Ok(Ordering::Greater),
        (Some(a), Some(b)) => a.try_cmp(&b),
    }
}

/// Check that every date has the same number of segments.  Returns that
/// number (or `None` if there were no dates).
pub fn ensure_same_segment_count<'a, I>(dates: I) -> Result<Option<usize>, DateError>
where
    I: IntoIterator<Item = &'a AbstractDate>,
{
    let mut expected = None;
    for date in dates {
        match expected {
            None => expected = Some(date.len()),
            Some(len) if len != date.len() => {
                return Err(DateError::SegmentCountMismatch {
                    left: len,
                    right: date.len(),
                });
            }
            Some(_) => (),
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod test {
    use super::*;

    fn cmp(a: Option<DatePoint<'_>>, b: Option<DatePoint<'_>>) -> Ordering {
        compare_abstract_dates(a, b).unwrap()
    }

    #[test]
    fn lexicographic() {
        let a = AbstractDate::from([2000, 1, 1]);
        let b = AbstractDate::from([2000, 1, 2]);
        let c = AbstractDate::from([1999, 12, 31]);
        assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
        assert_eq!(b.try_cmp(&a).unwrap(), Ordering::Greater);
        assert_eq!(c.try_cmp(&a).unwrap(), Ordering::Less);
        assert_eq!(a.try_cmp(&a.clone()).unwrap(), Ordering::Equal);

        // Negative segments
        let d = AbstractDate::from([-5, 3, 1]);
        assert_eq!(d.try_cmp(&c).unwrap(), Ordering::Less);
    }

    #[test]
    fn total_order() {
        let dates: Vec<AbstractDate> = [
            [0, 0, 0],
            [-1, 5, 5],
            [1, 0, 0],
            [1, 0, 1],
            [1, 1, 0],
            [1, 1, 0],
            [12, -3, 7],
        ]
        .into_iter()
        .map(AbstractDate::from)
        .collect();

        for a in &dates {
            // Reflexive
            assert_eq!(a.try_cmp(a).unwrap(), Ordering::Equal);
            for b in &dates {
                // Antisymmetric
                assert_eq!(a.try_cmp(b).unwrap(), b.try_cmp(a).unwrap().reverse());
                for c in &dates {
                    // Transitive
                    if a.try_cmp(b).unwrap().is_le() && b.try_cmp(c).unwrap().is_le() {
                        assert!(a.try_cmp(c).unwrap().is_le());
                    }
                }
            }
        }
    }

    #[test]
    fn now_sentinel() {
        let date = AbstractDate::from([99999, 12, 31]);
        let now = EndDate::Now;
        assert_eq!(
            cmp(Some(date.as_point()), Some(now.as_point())),
            Ordering::Less
        );
        assert_eq!(
            cmp(Some(now.as_point()), Some(date.as_point())),
            Ordering::Greater
        );
        assert_eq!(
            cmp(Some(DatePoint::Now), Some(DatePoint::Now)),
            Ordering::Equal
        );
    }

    #[test]
    fn undefined_ordering() {
        let date = AbstractDate::from([1]);
        assert_eq!(cmp(None, None), Ordering::Equal);
        assert_eq!(cmp(None, Some(date.as_point())), Ordering::Less);
        assert_eq!(cmp(None, Some(DatePoint::Now)), Ordering::Less);
        assert_eq!(cmp(Some(date.as_point()), None), Ordering::Greater);
        assert_eq!(cmp(Some(DatePoint::Now), None), Ordering::Greater);
    }

    #[test]
    fn segment_count_mismatch() {
        let short = AbstractDate::from([1, 2]);
        let long = AbstractDate::from([1, 2, 3]);
        assert_eq!(
            short.try_cmp(&long),
            Err(DateError::SegmentCountMismatch { left: 2, right: 3 })
        );
        assert!(compare_abstract_dates(Some(long.as_point()), Some(short.as_point())).is_err());

        // "now" never looks at segments
        assert!(compare_abstract_dates(Some(short.as_point()), Some(DatePoint::Now)).is_ok());

        assert_eq!(ensure_same_segment_count([&short, &short]), Ok(Some(2)));
        assert_eq!(ensure_same_segment_count(std::iter::empty::<&AbstractDate>()), Ok(None));
        assert!(ensure_same_segment_count([&short, &long]).is_err());
    }

    #[test]
    fn end_date_serde() {
        let now: EndDate = serde_json::from_str("true").unwrap();
        assert_eq!(now, EndDate::Now);
        assert!(now.is_now());

        let date: EndDate = serde_json::from_str("[2024, 3, -1]").unwrap();
        assert_eq!(date, EndDate::Date(AbstractDate::from([2024, 3, -1])));
        assert!(!date.is_now());

        assert!(serde_json::from_str::<EndDate>("false").is_err());
        assert!(serde_json::from_str::<EndDate>("\"2024\"").is_err());

        assert_eq!(serde_json::to_string(&EndDate::Now).unwrap(), "true");
        assert_eq!(serde_json::to_string(&date).unwrap(), "[2024,3,-1]");
    }

    #[test]
    fn display() {
        assert_eq!(AbstractDate::from([1000, 0, -3]).to_string(), "1000-0--3");
        assert_eq!(AbstractDate::from([4, 2])[1], 2);
    }
}
