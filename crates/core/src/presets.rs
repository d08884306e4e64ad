// SPDX-License-Identifier: MIT

//!
//! Built-in date presets
//!

use crate::{
    Condition, ConditionalFormat, DateTokenConfiguration, Evaluation, NumericTokenConfiguration,
    SettingsError, TimelineSettings,
};

/// Regex used by the three segment presets (`year-month-day`)
const YEAR_MONTH_DAY_REGEX: &str = "(?<year>-?[0-9]*)-(?<month>-?[0-9]*)-(?<day>-?[0-9]*)";

/// A named set of date settings
#[derive(Debug, Clone, Copy)]
pub struct DatePreset {
    pub name: &'static str,
    pub icon: &'static str,
    settings: fn() -> TimelineSettings,
}

impl DatePreset {
    pub fn settings(&self) -> TimelineSettings {
        (self.settings)()
    }
}

/// All built-in presets
pub const ALL_PRESETS: [DatePreset; 4] = [
    DatePreset {
        name: "normal",
        icon: "globe",
        settings: normal,
    },
    DatePreset {
        name: "imperial",
        icon: "globe",
        settings: imperial,
    },
    DatePreset {
        name: "verbose-day",
        icon: "pen-tool",
        settings: verbose_day,
    },
    DatePreset {
        name: "dnd-calendar-of-harptos-dalereckoning",
        icon: "compass",
        settings: harptos,
    },
];

/// Get the settings of a built-in preset by its name
pub fn preset_by_name(name: &str) -> Result<TimelineSettings, SettingsError> {
    ALL_PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .map(DatePreset::settings)
        .ok_or_else(|| SettingsError::UnknownPreset(name.to_string()))
}

/// `{day}/{month}/{year}`
pub fn normal() -> TimelineSettings {
    settings_with_dates(
        "{day}/{month}/{year}",
        "year,month,day",
        YEAR_MONTH_DAY_REGEX,
        vec![
            year_token(),
            DateTokenConfiguration::numeric("month"),
            DateTokenConfiguration::numeric("day"),
        ],
    )
}

/// `{month}/{day}/{year}`
pub fn imperial() -> TimelineSettings {
    settings_with_dates(
        "{month}/{day}/{year}",
        "month,year,day",
        YEAR_MONTH_DAY_REGEX,
        vec![
            year_token(),
            DateTokenConfiguration::numeric("month"),
            DateTokenConfiguration::numeric("day"),
        ],
    )
}

/// e.g. `3rd March 2024`
pub fn verbose_day() -> TimelineSettings {
    let months = labels(&[
        "invalid 0 index",
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ]);

    let mut day = NumericTokenConfiguration::new("day");
    day.min_length = 1;
    day.formatting = vec![
        suffix_rule(Condition::Equal, 1, "{value}st"),
        suffix_rule(Condition::Equal, 2, "{value}nd"),
        suffix_rule(Condition::Equal, 3, "{value}rd"),
        suffix_rule(Condition::Greater, 3, "{value}th"),
    ];

    settings_with_dates(
        "{day} {month} {year}",
        "year,month,day",
        YEAR_MONTH_DAY_REGEX,
        vec![
            year_token(),
            DateTokenConfiguration::enumerated("month", months),
            DateTokenConfiguration::Numeric(day),
        ],
    )
}

/// The Forgotten Realms' calendar of Harptos, Dalereckoning years
pub fn harptos() -> TimelineSettings {
    let months = labels(&[
        "Invalid",
        "Hammer",
        "Midwinter",
        "Alturiak",
        "Ches",
        "Tarsakh",
        "Greengrass",
        "Mirtul",
        "Kythorn",
        "Flamerule",
        "Midsummer",
        "Eleasis",
        "Elient",
        "Highharvesttide",
        "Marpenoth",
        "Uktar",
        "Feast of the Moon",
        "Nightal",
    ]);

    settings_with_dates(
        "{day} {month} {year}D.R. {hour}:{minute}",
        "year,month,day,hour,minute",
        "(?<year>-?[0-9]*)-(?<month>-?[0-9]*)-(?<day>-?[0-9]*)-(?<hour>-?[0-9]*)-(?<minute>-?[0-9]*)",
        vec![
            year_token(),
            DateTokenConfiguration::enumerated("month", months),
            DateTokenConfiguration::numeric("day"),
            DateTokenConfiguration::numeric("hour"),
            DateTokenConfiguration::numeric("minute"),
        ],
    )
}

fn settings_with_dates(
    date_display_format: &str,
    date_parser_group_priority: &str,
    date_parser_regex: &str,
    date_token_configuration: Vec<DateTokenConfiguration>,
) -> TimelineSettings {
    TimelineSettings {
        date_display_format: date_display_format.to_string(),
        date_parser_group_priority: date_parser_group_priority.to_string(),
        date_parser_regex: date_parser_regex.to_string(),
        date_token_configuration,
        apply_additional_condition_formatting: true,
        metadata_key_event_start_date: String::from("aat-event-start-date"),
        metadata_key_event_end_date: String::from("aat-event-end-date"),
        metadata_key_event_title_override: String::from("aat-event-title"),
        metadata_key_event_body_override: String::from("aat-event-body"),
        metadata_key_event_picture_override: String::from("aat-event-picture"),
        metadata_key_event_timeline_tag: String::from("timelines"),
        note_inline_event_key: String::from("aat-inline-event"),
        look_for_inline_events_in_notes: true,
        look_for_tags_for_timeline: false,
    }
}

fn year_token() -> DateTokenConfiguration {
    let mut year = NumericTokenConfiguration::new("year");
    year.min_length = 4;
    DateTokenConfiguration::Numeric(year)
}

fn suffix_rule(condition: Condition, value: i64, format: &str) -> ConditionalFormat {
    ConditionalFormat {
        evaluations: vec![Evaluation { condition, value }],
        conditions_are_exclusive: true,
        format: format.to_string(),
    }
}

fn labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}
