//! Feed adapters: one per advisory source, each mapping the newest entry of
//! its feed onto [`FeedFields`].

pub mod dates;

use std::fmt;

use feed_rs::model::Entry;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, ThreatFeedError};
use crate::domain::FeedFields;
use crate::normalizer;

pub use dates::{newest_entry_dates, RawDates};

/// Which entry timestamp a source publishes as its date line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Published,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Cisa,
    Nist,
    ThreatPost,
    BleepingComputer,
}

impl Source {
    pub const ALL: [Source; 4] = [
        Source::Cisa,
        Source::Nist,
        Source::ThreatPost,
        Source::BleepingComputer,
    ];

    /// Look up a source by its short alias (`cisa`, `nist`, `tp`, `bc`).
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.trim() {
            "cisa" => Some(Source::Cisa),
            "nist" => Some(Source::Nist),
            "tp" => Some(Source::ThreatPost),
            "bc" => Some(Source::BleepingComputer),
            _ => None,
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            Source::Cisa => "cisa",
            Source::Nist => "nist",
            Source::ThreatPost => "tp",
            Source::BleepingComputer => "bc",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Source::Cisa => "https://www.cisa.gov/uscert/ncas/alerts.xml",
            Source::Nist => "https://nvd.nist.gov/feeds/xml/cve/misc/nvd-rss-analyzed.xml",
            Source::ThreatPost => "https://threatpost.com/feed/",
            Source::BleepingComputer => "https://www.bleepingcomputer.com/feed/",
        }
    }

    pub fn publisher(self) -> &'static str {
        match self {
            Source::Cisa => "CISA (NCAS)",
            Source::Nist => "NIST CVE",
            Source::ThreatPost => "ThreatPost",
            Source::BleepingComputer => "Bleeping Computer",
        }
    }

    /// Boilerplate that precedes the useful part of each summary.
    pub fn strip_prefix(self) -> Option<&'static str> {
        match self {
            Source::Cisa => {
                Some(r#"<h3>Summary</h3><p class="tip-intro" style="font-size: 15px;">"#)
            }
            _ => None,
        }
    }

    pub fn date_field(self) -> DateField {
        match self {
            Source::Nist => DateField::Updated,
            _ => DateField::Published,
        }
    }

    /// Parse a fetched feed document and map its newest entry.
    ///
    /// Fails outright when the document cannot be parsed, has no entries, or
    /// the entry lacks a title, link, date, or summary.
    pub fn adapt(self, body: &[u8]) -> Result<FeedFields> {
        let feed = parser::parse(body).map_err(|e| ThreatFeedError::FeedParse(e.to_string()))?;

        let entry = feed
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| ThreatFeedError::feed(self.alias(), "feed has no entries"))?;

        self.map_entry(entry, newest_entry_dates(body))
    }

    fn map_entry(self, entry: Entry, raw_dates: RawDates) -> Result<FeedFields> {
        let missing = |field: &str| {
            ThreatFeedError::feed(self.alias(), format!("newest entry has no {}", field))
        };

        let title = entry
            .title
            .map(|t| {
                if t.content_type.essence().to_string() == "text/html" {
                    decode_html_entities(&t.content).to_string()
                } else {
                    t.content
                }
            })
            .ok_or_else(|| missing("title"))?;

        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .ok_or_else(|| missing("link"))?;

        // Feed text first; a parsed timestamp only when no date text exists.
        let (raw_primary, raw_fallback, parsed_primary, parsed_fallback) =
            match self.date_field() {
                DateField::Published => (
                    raw_dates.published,
                    raw_dates.updated,
                    entry.published,
                    entry.updated,
                ),
                DateField::Updated => (
                    raw_dates.updated,
                    raw_dates.published,
                    entry.updated,
                    entry.published,
                ),
            };
        let published_at = raw_primary
            .or(raw_fallback)
            .or_else(|| parsed_primary.or(parsed_fallback).map(|dt| dt.to_rfc2822()))
            .ok_or_else(|| missing("date"))?;

        let raw_excerpt = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .ok_or_else(|| missing("summary"))?;

        Ok(FeedFields {
            publisher: self.publisher().to_string(),
            title,
            published_at,
            excerpt: normalizer::normalize(&raw_excerpt, self.strip_prefix()),
            link,
        })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}
