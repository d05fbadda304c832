//! frab schedule document parser.
//!
//! Parses the XML dialect conference-scheduling tools publish: a
//! `<schedule>` root with a `<version>`, containing days, containing
//! rooms, containing `<event>` talk records. The parser validates the
//! minimal required shape and normalizes times; everything downstream
//! works on the typed tree it produces.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use roxmltree::{Document, Node};

use crate::error::ParseError;

/// The parsed document: version string plus days of rooms of talks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSchedule {
    pub version: String,
    pub days: Vec<ParsedDay>,
}

impl ParsedSchedule {
    /// Iterate all (room name, talk) pairs across days, in document order.
    pub fn room_talks(&self) -> impl Iterator<Item = (&str, &ParsedTalk)> {
        self.days.iter().flat_map(|day| {
            day.rooms
                .iter()
                .flat_map(|room| room.talks.iter().map(move |t| (room.name.as_str(), t)))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDay {
    pub rooms: Vec<ParsedRoom>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoom {
    pub name: String,
    pub talks: Vec<ParsedTalk>,
}

/// One `<event>` record with all fields the merge consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTalk {
    /// Upstream id attribute — first identity candidate.
    pub id: String,
    /// Upstream guid attribute — fallback identity candidate.
    pub guid: String,
    pub start: NaiveDateTime,
    /// Explicit `<end>` when present, otherwise start + duration.
    pub end: NaiveDateTime,
    /// Duration in whole minutes, for submission-type matching.
    pub duration_minutes: i64,
    pub type_name: String,
    pub track_name: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub abstract_text: String,
    pub language: String,
    /// From `<recording><optout>`; absent element means false.
    pub do_not_record: bool,
    /// Speaker display names, in document order.
    pub persons: Vec<String>,
}

/// Parse a raw document body.
///
/// # Errors
///
/// Returns [`ParseError`] when the body is not UTF-8, not well-formed XML,
/// has no `<version>`, or any talk lacks a required field.
pub fn parse_bytes(content: &[u8]) -> Result<ParsedSchedule, ParseError> {
    let text = std::str::from_utf8(content).map_err(|_| ParseError::Encoding)?;
    parse_str(text)
}

/// Parse a document string. See [`parse_bytes`].
///
/// # Errors
///
/// Returns [`ParseError`] on any shape or field violation.
pub fn parse_str(content: &str) -> Result<ParsedSchedule, ParseError> {
    let doc = Document::parse(content)?;
    let root = doc.root_element();

    let version = child_text(root, "version")
        .filter(|v| !v.is_empty())
        .ok_or(ParseError::MissingVersion)?
        .to_string();

    let mut days = Vec::new();
    for day in root.children().filter(|n| n.has_tag_name("day")) {
        let mut rooms = Vec::new();
        for room in day.children().filter(|n| n.has_tag_name("room")) {
            let name = room
                .attribute("name")
                .ok_or(ParseError::MissingRoomName)?
                .to_string();
            let mut talks = Vec::new();
            for event in room.children().filter(|n| n.has_tag_name("event")) {
                talks.push(parse_talk(event)?);
            }
            rooms.push(ParsedRoom { name, talks });
        }
        days.push(ParsedDay { rooms });
    }

    Ok(ParsedSchedule { version, days })
}

fn parse_talk(event: Node<'_, '_>) -> Result<ParsedTalk, ParseError> {
    let id = event
        .attribute("id")
        .ok_or(ParseError::MissingAttribute { attribute: "id" })?
        .to_string();
    let guid = event
        .attribute("guid")
        .ok_or(ParseError::MissingAttribute { attribute: "guid" })?
        .to_string();

    let date = parse_date(&id, required_text(event, &id, "date")?)?;
    let start_time = parse_time(&id, "start", required_text(event, &id, "start")?)?;
    let start = date.and_time(start_time);

    let duration_minutes = parse_duration(&id, required_text(event, &id, "duration")?)?;

    // Explicit end time wins; otherwise computed from the duration.
    let end = match child_text(event, "end").filter(|t| !t.is_empty()) {
        Some(end_text) => date.and_time(parse_time(&id, "end", end_text)?),
        None => start + chrono::Duration::minutes(duration_minutes),
    };

    let do_not_record = event
        .children()
        .find(|n| n.has_tag_name("recording"))
        .and_then(|rec| child_text(rec, "optout"))
        .is_some_and(|text| text == "true");

    let persons_node = event
        .children()
        .find(|n| n.has_tag_name("persons"))
        .ok_or_else(|| ParseError::MissingElement {
            id: id.clone(),
            element: "persons",
        })?;
    let persons = persons_node
        .children()
        .filter(|n| n.has_tag_name("person"))
        .filter_map(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect();

    Ok(ParsedTalk {
        type_name: required_text(event, &id, "type")?.to_string(),
        track_name: required_text(event, &id, "track")?.to_string(),
        title: required_text(event, &id, "title")?.to_string(),
        subtitle: required_text(event, &id, "subtitle")?.to_string(),
        description: required_text(event, &id, "description")?.to_string(),
        abstract_text: required_text(event, &id, "abstract")?.to_string(),
        language: required_text(event, &id, "language")?.to_string(),
        id,
        guid,
        start,
        end,
        duration_minutes,
        do_not_record,
        persons,
    })
}

/// Text of a direct child element, `""` for a present-but-empty element.
fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(name))
        .map(|n| n.text().unwrap_or("").trim())
}

/// Text of a required child element. Missing element is an error; empty
/// text is not.
fn required_text<'a>(
    node: Node<'a, '_>,
    id: &str,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    child_text(node, name).ok_or_else(|| ParseError::MissingElement {
        id: id.to_string(),
        element: name,
    })
}

/// Parse the `<date>` element. Tolerates a full ISO datetime by using its
/// date part, since some producers publish `2024-01-01T09:00:00+01:00`.
fn parse_date(id: &str, text: &str) -> Result<NaiveDate, ParseError> {
    let date_part = text.split('T').next().unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| ParseError::InvalidField {
        id: id.to_string(),
        field: "date",
        value: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_time(id: &str, field: &'static str, text: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|e| ParseError::InvalidField {
            id: id.to_string(),
            field,
            value: text.to_string(),
            reason: e.to_string(),
        })
}

/// Parse an `hours:minutes` duration into whole minutes.
fn parse_duration(id: &str, text: &str) -> Result<i64, ParseError> {
    let invalid = |reason: &str| ParseError::InvalidField {
        id: id.to_string(),
        field: "duration",
        value: text.to_string(),
        reason: reason.to_string(),
    };
    let (hours, minutes) = text.split_once(':').ok_or_else(|| invalid("expected hours:minutes"))?;
    let hours: i64 = hours.trim().parse().map_err(|_| invalid("non-numeric hours"))?;
    let minutes: i64 = minutes
        .trim()
        .parse()
        .map_err(|_| invalid("non-numeric minutes"))?;
    Ok(hours * 60 + minutes)
}
