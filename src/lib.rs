//! # threat-feed
//!
//! Pulls security-advisory feeds, formats the newest entry of each as a chat
//! announcement, and suppresses anything already announced.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Source adapter → Normalizer → Formatter → Dedup gate ⇄ Store
//! ```
//!
//! A host process (bot, cron job) calls [`Pipeline::run_alias`] periodically
//! and posts whatever text comes back.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print new announcements from every source
//! threat-feed run
//!
//! # Only CISA and NIST
//! threat-feed run cisa nist
//!
//! # Rebuild a lost store from a channel export
//! threat-feed recon channel-export.txt
//! ```
//!
//! [`Pipeline::run_alias`]: pipeline::Pipeline::run_alias

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config, store
/// and fetcher.
pub mod app;

/// Command-line interface using clap.
///
/// - `run [ALIAS...]` - Announce new entries
/// - `sources` - List source aliases
/// - `recon <FILE>` - Rebuild the fingerprint store
pub mod cli;

/// Configuration loaded from `~/.config/threat-feed/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`FeedFields`](domain::FeedFields): the five fields of an announcement
/// - [`Fingerprint`](domain::Fingerprint): SHA-256 identity of a post
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Announcement template.
pub mod formatter;

/// Content-based duplicate suppression.
pub mod gate;

/// Feed markup to quoted excerpt conversion.
pub mod normalizer;

/// Alias dispatch and the end-to-end run.
pub mod pipeline;

/// Per-source feed adapters.
pub mod sources;

/// Fingerprint persistence.
///
/// - [`FingerprintStore`](store::FingerprintStore): Trait defining storage operations
/// - [`FileStore`](store::FileStore): Plain-text, append-only file
/// - [`MemoryStore`](store::MemoryStore): Volatile store for dry runs
pub mod store;
