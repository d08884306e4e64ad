// SPDX-License-Identifier: MIT

//!
//! Timeline settings
//!
//! The settings are always passed explicitly to the functions that need them.
//! Missing keys fall back to the defaults (the "normal" date preset).
//!

use crate::{DateTokenConfiguration, presets};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Front-matter key that must be `true` for a note to be put on a timeline
pub const RENDER_ENABLED_METADATA_KEY: &str = "aat-render-enabled";

/// Errors that can arise when loading or using [`TimelineSettings`]
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No date preset called `{0}`")]
    UnknownPreset(String),

    #[error("Invalid regex: {0}")]
    Regex(#[from] regex::Error),
}

/// Everything needed to parse, order and display the dates of one timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineSettings {
    /// Template with `{segmentName}` placeholders, e.g. `{day}/{month}/{year}`
    pub date_display_format: String,

    /// Comma separated segment names, most significant first.  This defines
    /// the order of an abstract date's segments.
    pub date_parser_group_priority: String,

    /// Regex with one named group per segment, used to read dates from notes
    pub date_parser_regex: String,

    pub date_token_configuration: Vec<DateTokenConfiguration>,

    #[serde(alias = "applyAdditonalConditionFormatting")]
    pub apply_additional_condition_formatting: bool,

    pub metadata_key_event_start_date: String,
    pub metadata_key_event_end_date: String,
    pub metadata_key_event_title_override: String,
    pub metadata_key_event_body_override: String,
    pub metadata_key_event_picture_override: String,
    pub metadata_key_event_timeline_tag: String,

    /// Key opening an inline event block in a note's body (`%%<key>`)
    pub note_inline_event_key: String,

    /// Read inline event blocks from note bodies
    pub look_for_inline_events_in_notes: bool,

    /// Also match a note's own tags (not only the timeline tag key)
    pub look_for_tags_for_timeline: bool,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        presets::normal()
    }
}

impl TimelineSettings {
    /// Load settings from JSON (missing keys are set to their defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: TimelineSettings = serde_json::from_str(json)?;
        debug!(
            "settings loaded (format `{}`, segments `{}`)",
            settings.date_display_format, settings.date_parser_group_priority
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The segment names, most significant first
    pub fn segment_names(&self) -> impl Iterator<Item = &str> {
        self.date_parser_group_priority
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// The number of segments every date on this timeline has
    pub fn segment_count(&self) -> usize {
        self.segment_names().count()
    }

    /// Find the display configuration for a segment
    pub fn token_configuration(&self, name: &str) -> Option<&DateTokenConfiguration> {
        self.date_token_configuration
            .iter()
            .find(|configuration| configuration.name() == name)
    }

    /// Compile the date parser regex
    pub fn date_parser(&self) -> Result<Regex, SettingsError> {
        Ok(Regex::new(&self.date_parser_regex)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_round_trip() {
        let settings = TimelineSettings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(TimelineSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn partial_json() {
        let settings = TimelineSettings::from_json(
            r#"{ "dateDisplayFormat": "{year}", "applyAdditonalConditionFormatting": false }"#,
        )
        .unwrap();
        assert_eq!(settings.date_display_format, "{year}");
        assert!(!settings.apply_additional_condition_formatting);
        assert_eq!(settings.metadata_key_event_start_date, "aat-event-start-date");
        assert_eq!(settings.segment_count(), 3);
        assert!(settings.look_for_inline_events_in_notes);

        let settings =
            TimelineSettings::from_json(r#"{ "lookForInlineEventsInNotes": false }"#).unwrap();
        assert!(!settings.look_for_inline_events_in_notes);
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            TimelineSettings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
        assert!(
            TimelineSettings::from_json(
                r#"{ "dateTokenConfiguration": [{ "type": "boolean", "name": "x" }] }"#
            )
            .is_err()
        );
    }

    #[test]
    fn segment_names() {
        let settings = TimelineSettings {
            date_parser_group_priority: String::from("cycle, moon,phase,,day"),
            ..Default::default()
        };
        let names: Vec<&str> = settings.segment_names().collect();
        assert_eq!(names, vec!["cycle", "moon", "phase", "day"]);
    }

    #[test]
    fn token_configuration_lookup() {
        let settings = TimelineSettings::default();
        assert_eq!(settings.token_configuration("month").unwrap().name(), "month");
        assert!(settings.token_configuration("moon").is_none());
    }

    #[test]
    fn date_parser() {
        assert!(TimelineSettings::default().date_parser().is_ok());
        let settings = TimelineSettings {
            date_parser_regex: String::from("(?<year>"),
            ..Default::default()
        };
        assert!(matches!(
            settings.date_parser(),
            Err(SettingsError::Regex(_))
        ));
    }
}
