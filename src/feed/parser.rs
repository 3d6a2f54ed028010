//! RSS feed parsing.
//!
//! Reads `<item>` elements (RSS 2.0, and RSS 1.0 where items sit beside the
//! channel) and takes the text of their direct `<title>`, `<description>` and
//! `<link>` children. Names are compared unprefixed, so extension elements such
//! as `<media:title>` or `<atom:link/>` never fill an item field.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error_handling::FeedError;

use super::TestItem;

/// Items read from a feed, plus how many of the considered items were malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub items: Vec<TestItem>,
    pub malformed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Link,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"description" => Some(Field::Description),
            b"link" => Some(Field::Link),
            _ => None,
        }
    }
}

/// Item under construction.
#[derive(Debug, Default)]
struct PartialItem {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
}

impl PartialItem {
    fn set(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Link => &mut self.link,
        };
        // First occurrence wins
        if slot.is_none() {
            *slot = Some(text.trim().to_string());
        }
    }

    fn finish(self) -> Option<TestItem> {
        Some(TestItem {
            title: self.title?,
            description: self.description?,
            link: self.link?,
        })
    }
}

/// Parses up to `limit` items from feed XML, in document order.
///
/// The first `limit` `<item>` elements are considered; any of them missing a
/// title, description or link is skipped and counted in `malformed`, so the
/// result never holds more than `limit` items.
///
/// # Errors
///
/// Returns `FeedError::Xml` if the document is not well-formed up to the point
/// where `limit` items have been read.
pub fn parse_feed(xml: &str, limit: usize) -> Result<ParsedFeed, FeedError> {
    let mut parsed = ParsedFeed::default();
    if limit == 0 {
        return Ok(parsed);
    }

    let mut reader = Reader::from_str(xml);
    let mut depth: usize = 0;
    let mut considered = 0;
    // Depth of the open <item>, if any
    let mut item_depth: Option<usize> = None;
    let mut current = PartialItem::default();
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        let event = reader.read_event().map_err(|source| FeedError::Xml {
            position: reader.buffer_position(),
            source,
        })?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                let name = e.name();
                match item_depth {
                    None if name.as_ref() == b"item" => {
                        item_depth = Some(depth);
                        current = PartialItem::default();
                    }
                    Some(open) if depth == open + 1 => {
                        field = Field::from_name(name.as_ref());
                        text.clear();
                    }
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                let name = e.name();
                match item_depth {
                    None if name.as_ref() == b"item" => {
                        considered += 1;
                        parsed.malformed += 1;
                    }
                    Some(open) if depth == open => {
                        if let Some(empty_field) = Field::from_name(name.as_ref()) {
                            current.set(empty_field, "");
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if field.is_some() {
                    match e.unescape() {
                        Ok(unescaped) => text.push_str(&unescaped),
                        Err(_) => text.push_str(&String::from_utf8_lossy(e)),
                    }
                }
            }
            Event::CData(ref e) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => {
                match item_depth {
                    Some(open) if depth == open + 1 => {
                        if let Some(done) = field.take() {
                            current.set(done, &text);
                        }
                    }
                    Some(open) if depth == open && e.name().as_ref() == b"item" => {
                        item_depth = None;
                        considered += 1;
                        match std::mem::take(&mut current).finish() {
                            Some(item) => parsed.items.push(item),
                            None => {
                                log::warn!("Skipping feed item without title, description or link");
                                parsed.malformed += 1;
                            }
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }

        if considered >= limit {
            break;
        }
    }

    Ok(parsed)
}
