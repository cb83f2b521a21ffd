//! Raw date text of the newest feed entry.
//!
//! feed-rs only exposes parsed timestamps, which drops the feed's own offset
//! and wording. This reads the first `<item>`/`<entry>` a second time and
//! keeps the date elements exactly as published.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Date text of one entry, trimmed but otherwise untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDates {
    pub published: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum DateElement {
    Published,
    Updated,
}

impl DateElement {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"pubDate" | b"published" | b"issued" => Some(DateElement::Published),
            b"updated" | b"date" | b"modified" => Some(DateElement::Updated),
            _ => None,
        }
    }
}

/// Collect the date elements that are direct children of the first entry.
///
/// Best-effort: malformed XML ends the scan with whatever was found so far.
pub fn newest_entry_dates(body: &[u8]) -> RawDates {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    let mut dates = RawDates::default();

    let mut depth = 0usize;
    let mut entry_depth: Option<usize> = None;
    let mut element: Option<DateElement> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();
                match entry_depth {
                    None if matches!(name.as_ref(), b"item" | b"entry") => {
                        entry_depth = Some(depth);
                    }
                    Some(entry) if depth == entry + 1 => {
                        element = DateElement::from_local_name(name.as_ref());
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(t)) if element.is_some() => match t.unescape() {
                Ok(unescaped) => text.push_str(&unescaped),
                Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
            },
            Ok(Event::CData(c)) if element.is_some() => {
                text.push_str(&String::from_utf8_lossy(&c));
            }
            Ok(Event::End(_)) => {
                if entry_depth == Some(depth) {
                    break;
                }
                if entry_depth.is_some_and(|entry| depth == entry + 1) {
                    if let Some(found) = element.take() {
                        let slot = match found {
                            DateElement::Published => &mut dates.published,
                            DateElement::Updated => &mut dates.updated,
                        };
                        let value = text.trim();
                        if slot.is_none() && !value.is_empty() {
                            *slot = Some(value.to_string());
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!("Stopped scanning entry dates: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rss_pub_date_kept_verbatim() {
        let rss = r#"<rss version="2.0"><channel>
<pubDate>Sun, 31 Dec 2023 00:00:00 GMT</pubDate>
<item><title>a</title><pubDate> Tue, 02 Jan 2024 10:30:00 -0500 </pubDate></item>
<item><title>b</title><pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate></item>
</channel></rss>"#;

        assert_eq!(
            newest_entry_dates(rss.as_bytes()),
            RawDates {
                published: Some("Tue, 02 Jan 2024 10:30:00 -0500".into()),
                updated: None,
            }
        );
    }

    #[test]
    fn test_atom_dates_ignore_nested_source() {
        let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<updated>2024-01-05T00:00:00Z</updated>
<entry>
  <source><updated>1999-01-01T00:00:00Z</updated></source>
  <published>2024-01-03T08:00:00+02:00</published>
  <updated>2024-01-04T08:00:00+02:00</updated>
</entry>
</feed>"#;

        assert_eq!(
            newest_entry_dates(atom.as_bytes()),
            RawDates {
                published: Some("2024-01-03T08:00:00+02:00".into()),
                updated: Some("2024-01-04T08:00:00+02:00".into()),
            }
        );
    }

    #[test]
    fn test_dublin_core_date() {
        let rdf = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:dc="http://purl.org/dc/elements/1.1/">
<item><title>CVE</title><dc:date>2024-01-04T08:00:00-05:00</dc:date></item>
</rdf:RDF>"#;

        assert_eq!(
            newest_entry_dates(rdf.as_bytes()).updated.as_deref(),
            Some("2024-01-04T08:00:00-05:00")
        );
    }

    #[test]
    fn test_unparseable_text_still_returned() {
        let rss = "<rss><channel><item>\
                   <pubDate>Yesterday afternoon</pubDate>\
                   </item></channel></rss>";
        assert_eq!(
            newest_entry_dates(rss.as_bytes()).published.as_deref(),
            Some("Yesterday afternoon")
        );
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert_eq!(newest_entry_dates(b"not xml at all"), RawDates::default());
    }
}
