// SPDX-License-Identifier: MIT

//!
//! Typed event metadata read from a note's front-matter (or from an inline
//! event block in its body).  Values are validated here, once, so that the
//! rest of the crate only ever sees [`AbstractDate`]s and plain strings.
//!

use crate::{
    AbstractDate, CardContent, EndDate, RENDER_ENABLED_METADATA_KEY, SettingsError,
    TimelineSettings,
};
use log::{debug, trace};
use regex::Regex;
use serde_json::{Map, Value};

/// A front-matter value that may describe a date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataDate {
    /// A bare number is the first (most significant) segment
    Number(i64),

    /// Parsed with the timeline's date parser regex
    Text(String),

    /// `true` as an end date means the event is ongoing
    Flag(bool),
}

impl MetadataDate {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(MetadataDate::Number),
            Value::String(text) => Some(MetadataDate::Text(text.to_owned())),
            Value::Bool(flag) => Some(MetadataDate::Flag(*flag)),
            _ => None,
        }
    }
}

/// The metadata of one event, with every recognised key validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMetadata {
    pub render_enabled: bool,
    pub start_date: Option<MetadataDate>,
    pub end_date: Option<MetadataDate>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub picture: Option<String>,

    /// Timelines the event was explicitly put on
    pub timelines: Vec<String>,

    /// The front-matter `tags` key (comma separated string or list)
    pub tags: Vec<String>,
}

impl EventMetadata {
    /// Read the keys configured in the settings from a front-matter object.
    /// Values of an unexpected type are ignored.
    pub fn from_front_matter(front_matter: &Map<String, Value>, settings: &TimelineSettings) -> Self {
        let text = |key: &str| front_matter.get(key).and_then(Value::as_str).map(String::from);
        let date = |key: &str| front_matter.get(key).and_then(MetadataDate::from_value);

        let timelines = front_matter
            .get(&settings.metadata_key_event_timeline_tag)
            .map(string_list)
            .unwrap_or_default();

        let tags = match front_matter.get("tags") {
            Some(Value::String(tags)) => tags
                .split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
            Some(value) => string_list(value),
            None => Vec::new(),
        };

        Self {
            render_enabled: front_matter.get(RENDER_ENABLED_METADATA_KEY) == Some(&Value::Bool(true)),
            start_date: date(&settings.metadata_key_event_start_date),
            end_date: date(&settings.metadata_key_event_end_date),
            title: text(&settings.metadata_key_event_title_override),
            body: text(&settings.metadata_key_event_body_override),
            picture: text(&settings.metadata_key_event_picture_override),
            timelines,
            tags,
        }
    }

    /// All tags the event can be matched on.  `note_tags` are the tags found
    /// in the note's body (without their leading `#`).
    pub fn event_tags(&self, note_tags: &[String], settings: &TimelineSettings) -> Vec<String> {
        let mut output = self.timelines.clone();
        if !settings.look_for_tags_for_timeline {
            return output;
        }
        output.extend(note_tags.iter().cloned());
        output.extend(self.tags.iter().cloned());
        output
    }

    /// Whether the event belongs on a timeline looking for any of the given
    /// tags
    pub fn matches_tags(
        &self,
        tags_to_find: &[String],
        note_tags: &[String],
        settings: &TimelineSettings,
    ) -> bool {
        self.event_tags(note_tags, settings)
            .iter()
            .any(|tag| tags_to_find.contains(tag))
    }

    /// Build the card for this event.  The title falls back to the note's name.
    pub fn into_card_content<S: ToString>(self, fallback_title: S, parser: &DateParser) -> CardContent {
        let start_date = self.start_date.as_ref().and_then(|date| parser.parse(date));
        let end_date = match &self.end_date {
            Some(MetadataDate::Flag(true)) => Some(EndDate::Now),
            Some(date) => parser.parse(date).map(EndDate::Date),
            None => None,
        };

        CardContent {
            title: self.title.unwrap_or_else(|| fallback_title.to_string()),
            body: self.body,
            image_url: self.picture,
            start_date,
            end_date,
        }
    }
}

/// Reads [`AbstractDate`]s from front-matter values
#[derive(Debug, Clone)]
pub struct DateParser {
    regex: Regex,
    segment_names: Vec<String>,
}

impl DateParser {
    pub fn new(settings: &TimelineSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            regex: settings.date_parser()?,
            segment_names: settings.segment_names().map(String::from).collect(),
        })
    }

    /// Parse a date.  Returns `None` if it doesn't describe a full date.
    pub fn parse(&self, date: &MetadataDate) -> Option<AbstractDate> {
        match date {
            MetadataDate::Number(number) => {
                let mut segments = vec![0; self.segment_names.len().max(1)];
                segments[0] = *number;
                Some(AbstractDate::new(segments))
            }
            MetadataDate::Text(text) => self.parse_str(text),
            MetadataDate::Flag(_) => None,
        }
    }

    /// Parse a date string with the named groups of the parser regex
    pub fn parse_str(&self, text: &str) -> Option<AbstractDate> {
        let Some(captures) = self.regex.captures(text) else {
            debug!("`{text}` doesn't match the date parser");
            return None;
        };

        let mut segments = Vec::with_capacity(self.segment_names.len());
        for name in &self.segment_names {
            let capture = captures.name(name)?.as_str().trim();
            let segment = if capture.is_empty() {
                0
            } else {
                capture.parse::<i64>().ok()?
            };
            segments.push(segment);
        }
        trace!("`{text}` parsed as {segments:?}");
        Some(AbstractDate::new(segments))
    }
}

/// Finds the inline event blocks of a note's body and reads each one as its
/// own event:
///
/// ```text
/// %%aat-inline-event
/// aat-render-enabled: true
/// aat-event-start-date: 2024-03-01
/// aat-event-title: Spring
/// %%
/// ```
///
/// Blocks may be indented.  Blocks without `aat-render-enabled: true` are
/// skipped, and nothing is found when the timeline doesn't look for inline
/// events.
#[derive(Debug, Clone)]
pub struct InlineEventParser {
    block: Regex,
    enabled: bool,
}

impl InlineEventParser {
    pub fn new(settings: &TimelineSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            block: Regex::new(&format!(
                r"(?i)%%{}\n\s*(((\s|\d|[a-z]|-)*):(.*)\n\s*)*%%",
                regex::escape(&settings.note_inline_event_key)
            ))?,
            enabled: settings.look_for_inline_events_in_notes,
        })
    }

    pub fn parse(&self, body: &str, settings: &TimelineSettings) -> Vec<EventMetadata> {
        if !self.enabled {
            return Vec::new();
        }

        let events: Vec<EventMetadata> = self
            .block
            .find_iter(body)
            .map(|found| {
                let front_matter: Map<String, Value> = found
                    .as_str()
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .map(|(key, value)| (key.trim().to_string(), inline_value(value.trim())))
                    .collect();
                EventMetadata::from_front_matter(&front_matter, settings)
            })
            .filter(|event| event.render_enabled)
            .collect();

        debug!("found {} inline events", events.len());
        events
    }
}

/// Read the inline events of one note body (see [`InlineEventParser`])
pub fn parse_inline_events(
    body: &str,
    settings: &TimelineSettings,
) -> Result<Vec<EventMetadata>, SettingsError> {
    Ok(InlineEventParser::new(settings)?.parse(body, settings))
}

/// Coerce an inline `key: value` value the way a YAML reader would for the
/// simple cases (integers, booleans, quoted strings, flow lists)
fn inline_value(value: &str) -> Value {
    if let Ok(number) = value.parse::<i64>() {
        return Value::from(number);
    }
    match value {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => (),
    }
    if let Some(list) = value.strip_prefix('[').and_then(|value| value.strip_suffix(']')) {
        return Value::Array(
            list.split(',')
                .map(|item| Value::from(unquote(item.trim())))
                .collect(),
        );
    }
    Value::from(unquote(value))
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|quote| value.strip_prefix(*quote)?.strip_suffix(*quote))
        .unwrap_or(value)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn front_matter(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("front-matter must be an object"),
        }
    }

    #[test]
    fn read_front_matter() {
        let settings = TimelineSettings::default();
        let metadata = EventMetadata::from_front_matter(
            &front_matter(json!({
                "aat-render-enabled": true,
                "aat-event-start-date": "2024-03-01",
                "aat-event-end-date": true,
                "aat-event-title": "Spring",
                "aat-event-picture": 42,
                "timelines": ["seasons", 3, "weather"],
                "tags": "a, b,",
            })),
            &settings,
        );
        assert!(metadata.render_enabled);
        assert_eq!(metadata.start_date, Some(MetadataDate::Text(String::from("2024-03-01"))));
        assert_eq!(metadata.end_date, Some(MetadataDate::Flag(true)));
        assert_eq!(metadata.title.as_deref(), Some("Spring"));
        assert_eq!(metadata.picture, None);
        assert_eq!(metadata.timelines, vec!["seasons", "weather"]);
        assert_eq!(metadata.tags, vec!["a", "b"]);

        let metadata = EventMetadata::from_front_matter(
            &front_matter(json!({ "aat-render-enabled": "yes" })),
            &settings,
        );
        assert!(!metadata.render_enabled);
    }

    #[test]
    fn tags() {
        let mut settings = TimelineSettings::default();
        let metadata = EventMetadata {
            timelines: vec![String::from("history")],
            tags: vec![String::from("people")],
            ..Default::default()
        };
        let note_tags = vec![String::from("battles")];
        let find = |tag: &str| vec![String::from(tag)];

        assert!(metadata.matches_tags(&find("history"), &note_tags, &settings));
        assert!(!metadata.matches_tags(&find("people"), &note_tags, &settings));
        assert!(!metadata.matches_tags(&find("battles"), &note_tags, &settings));

        settings.look_for_tags_for_timeline = true;
        assert!(metadata.matches_tags(&find("people"), &note_tags, &settings));
        assert!(metadata.matches_tags(&find("battles"), &note_tags, &settings));
        assert!(!metadata.matches_tags(&find("art"), &note_tags, &settings));
    }

    #[test]
    fn parse_dates() {
        let parser = DateParser::new(&TimelineSettings::default()).unwrap();
        assert_eq!(
            parser.parse_str("2024-03-01"),
            Some(AbstractDate::from([2024, 3, 1]))
        );
        assert_eq!(
            parser.parse_str("-300-1-1"),
            Some(AbstractDate::from([-300, 1, 1]))
        );

        // Empty groups read as zero
        assert_eq!(parser.parse_str("1000--"), Some(AbstractDate::from([1000, 0, 0])));

        assert_eq!(parser.parse_str("March 2024"), None);
        assert_eq!(
            parser.parse(&MetadataDate::Number(1066)),
            Some(AbstractDate::from([1066, 0, 0]))
        );
        assert_eq!(parser.parse(&MetadataDate::Flag(true)), None);
    }

    #[test]
    fn parse_with_missing_group() {
        let settings = TimelineSettings {
            date_parser_regex: String::from("(?<year>-?[0-9]+)"),
            ..Default::default()
        };
        let parser = DateParser::new(&settings).unwrap();
        assert_eq!(parser.parse_str("2024"), None);
    }

    #[test]
    fn card_content() {
        let parser = DateParser::new(&TimelineSettings::default()).unwrap();
        let metadata = EventMetadata {
            start_date: Some(MetadataDate::Text(String::from("2020-01-01"))),
            end_date: Some(MetadataDate::Flag(true)),
            body: Some(String::from("Ongoing")),
            ..Default::default()
        };
        let card = metadata.into_card_content("Note name", &parser);
        assert_eq!(card.title, "Note name");
        assert_eq!(card.body.as_deref(), Some("Ongoing"));
        assert_eq!(card.start_date, Some(AbstractDate::from([2020, 1, 1])));
        assert_eq!(card.end_date, Some(EndDate::Now));

        let metadata = EventMetadata {
            title: Some(String::from("Override")),
            start_date: Some(MetadataDate::Number(5)),
            end_date: Some(MetadataDate::Text(String::from("not a date"))),
            ..Default::default()
        };
        let card = metadata.into_card_content("Note name", &parser);
        assert_eq!(card.title, "Override");
        assert_eq!(card.end_date, None);

        let metadata = EventMetadata {
            end_date: Some(MetadataDate::Flag(false)),
            ..Default::default()
        };
        assert_eq!(metadata.into_card_content("x", &parser).end_date, None);
    }

    #[test]
    fn inline_events() {
        let settings = TimelineSettings::default();
        let body = "Some text\n\
            %%aat-inline-event\n\
            aat-render-enabled: true\n\
            aat-event-start-date: 2024-03-01\n\
            aat-event-title: \"Spring\"\n\
            timelines: [seasons, 'weather']\n\
            %%\n\
            More text\n\
            %%aat-inline-event\n\
            aat-event-start-date: 1066\n\
            aat-event-end-date: true\n\
            aat-render-enabled: true\n\
            %%\n\
            %%aat-inline-event\n\
            aat-event-start-date: 1200\n\
            %%\n";
        let events = parse_inline_events(body, &settings).unwrap();
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].title.as_deref(), Some("Spring"));
        assert_eq!(events[0].timelines, vec!["seasons", "weather"]);
        assert_eq!(
            events[0].start_date,
            Some(MetadataDate::Text(String::from("2024-03-01")))
        );

        // Nothing leaks from the first block into the second
        assert_eq!(events[1].title, None);
        assert!(events[1].timelines.is_empty());
        assert_eq!(events[1].start_date, Some(MetadataDate::Number(1066)));
        assert_eq!(events[1].end_date, Some(MetadataDate::Flag(true)));

        assert!(parse_inline_events("no events", &settings).unwrap().is_empty());

        let settings = TimelineSettings {
            look_for_inline_events_in_notes: false,
            ..Default::default()
        };
        assert!(parse_inline_events(body, &settings).unwrap().is_empty());
    }

    #[test]
    fn indented_inline_events() {
        let settings = TimelineSettings::default();
        let body = "<div>\n\
            \t\t%%aat-inline-event\n\
            \t\taat-event-start-date: 54\n\
            \t\taat-event-end-date: true\n\
            \t\taat-render-enabled: true\n\
            \t\ttimelines: [timeline]\n\
            \t\t%%\n\
            </div>\n\
            %%aat-inline-event\n  aat-event-start-date: 2024-03-01\n  aat-render-enabled: true\n  %%\n";
        let parser = InlineEventParser::new(&settings).unwrap();
        let events = parser.parse(body, &settings);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start_date, Some(MetadataDate::Number(54)));
        assert_eq!(events[0].end_date, Some(MetadataDate::Flag(true)));
        assert_eq!(events[0].timelines, vec!["timeline"]);
        assert_eq!(
            events[1].start_date,
            Some(MetadataDate::Text(String::from("2024-03-01")))
        );
    }
}
