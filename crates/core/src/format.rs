// SPDX-License-Identifier: MIT

//!
//! Display abstract dates as text
//!

use crate::{DatePoint, DateTokenConfiguration, NumericTokenConfiguration, TimelineSettings};
use log::trace;
use thiserror::Error;

/// What an ongoing event's end date is displayed as
pub const NOW_LABEL: &str = "now";

/// Numeric tokens are never padded beyond this many digits
pub const MAX_PADDED_LENGTH: usize = 64;

/// Errors that can arise when formatting a date.  These are all caused by the
/// timeline settings not matching the dates being displayed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("No date token configuration found for `{0}`, please setup your date tokens correctly")]
    MissingTokenConfiguration(String),

    #[error("The date has no segment `{name}` (index {index})")]
    MissingSegment { name: String, index: usize },

    #[error("`{index}` is not an entry of the `{name}` dictionary ({len} entries)")]
    DictionaryIndexOutOfBounds { name: String, index: i64, len: usize },
}

/// Format a date (or "now") using the timeline's display template.
///
/// Each segment named in the priority list replaces the first `{name}`
/// placeholder of the template.  Template text that isn't a placeholder for a
/// listed segment is left as is.
pub fn format_abstract_date(
    date: DatePoint<'_>,
    settings: &TimelineSettings,
) -> Result<String, FormatError> {
    let DatePoint::Date(date) = date else {
        return Ok(String::from(NOW_LABEL));
    };

    let mut output = settings.date_display_format.clone();
    for (index, name) in settings.segment_names().enumerate() {
        let configuration = settings
            .token_configuration(name)
            .ok_or_else(|| FormatError::MissingTokenConfiguration(name.to_string()))?;

        let value = date.get(index).ok_or_else(|| FormatError::MissingSegment {
            name: name.to_string(),
            index,
        })?;

        let token = if configuration.hides(value) {
            String::new()
        } else {
            apply_condition_based_formatting(
                format_date_token(value, configuration)?,
                value,
                configuration,
                settings.apply_additional_condition_formatting,
            )
        };

        trace!("segment `{name}` = {value} formatted as `{token}`");
        output = output.replacen(&format!("{{{name}}}"), &token, 1);
    }

    Ok(output)
}

/// Format a single segment value
pub fn format_date_token(
    value: i64,
    configuration: &DateTokenConfiguration,
) -> Result<String, FormatError> {
    match configuration {
        DateTokenConfiguration::Numeric(configuration) => {
            Ok(format_number_date_token(value, configuration))
        }
        DateTokenConfiguration::Enumerated(configuration) => usize::try_from(value)
            .ok()
            .and_then(|index| configuration.dictionary.get(index))
            .cloned()
            .ok_or_else(|| FormatError::DictionaryIndexOutOfBounds {
                name: configuration.name.clone(),
                index: value,
                len: configuration.dictionary.len(),
            }),
    }
}

/// Wrap an already formatted token with every matching conditional format, in
/// order (each rule wraps the result of the previous ones)
pub fn apply_condition_based_formatting(
    formatted: String,
    value: i64,
    configuration: &DateTokenConfiguration,
    apply_additional_condition_formatting: bool,
) -> String {
    if !apply_additional_condition_formatting {
        return formatted;
    }

    configuration
        .formatting()
        .iter()
        .fold(formatted, |output, rule| {
            if rule.matches(value) {
                rule.format.replacen("{value}", &output, 1)
            } else {
                output
            }
        })
}

fn format_number_date_token(value: i64, configuration: &NumericTokenConfiguration) -> String {
    let min_length = usize::try_from(configuration.min_length)
        .unwrap_or(0)
        .min(MAX_PADDED_LENGTH);
    let digits = format!("{:0>min_length$}", value.unsigned_abs());
    if !configuration.hide_sign && value < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}
