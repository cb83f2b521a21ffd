use std::fmt;

use sha2::{Digest, Sha256};

/// Marker that precedes the digest in a post's trailing annotation.
pub const ANNOTATION_TAG: &str = "post_id=";

/// SHA-256 digest of a formatted post, rendered as 64 lowercase hex chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub const HEX_LEN: usize = 64;

    /// Hash the exact bytes of `content`. Whitespace is significant.
    pub fn of(content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Accept an existing hex digest, e.g. a line read back from the store.
    pub fn parse(hex_digest: &str) -> Option<Self> {
        let hex_digest = hex_digest.trim();
        if hex_digest.len() == Self::HEX_LEN && hex_digest.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(hex_digest.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Inline code span appended to an emitted post: `` `post_id=<hex>` ``.
    pub fn annotation(&self) -> String {
        format!("`{}{}`", ANNOTATION_TAG, self.0)
    }

    /// Find every annotation in a block of previously posted text.
    pub fn scan_annotations(text: &str) -> Vec<Self> {
        let mut found = Vec::new();
        let pattern = format!("`{}", ANNOTATION_TAG);
        let mut rest = text;

        while let Some(start) = rest.find(&pattern) {
            rest = &rest[start + pattern.len()..];
            let Some(end) = rest.find('`') else {
                break;
            };
            if let Some(fingerprint) = Self::parse(&rest[..end]) {
                found.push(fingerprint);
            }
            rest = &rest[end + 1..];
        }

        found
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(Fingerprint::of("same post"), Fingerprint::of("same post"));
    }

    #[test]
    fn test_fingerprint_whitespace_sensitive() {
        assert_ne!(Fingerprint::of("post\n"), Fingerprint::of("post\n\n"));
        assert_ne!(Fingerprint::of("a b"), Fingerprint::of("a  b"));
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = Fingerprint::of("hello");
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            fp.as_str(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_annotation_format() {
        let fp = Fingerprint::of("hello");
        assert_eq!(
            fp.annotation(),
            "`post_id=2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824`"
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Fingerprint::parse("not a digest").is_none());
        assert!(Fingerprint::parse("abc123").is_none());
        assert!(Fingerprint::parse(&"g".repeat(64)).is_none());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let upper = "2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824\n";
        assert_eq!(Fingerprint::parse(upper), Some(Fingerprint::of("hello")));
    }

    #[test]
    fn test_scan_annotations() {
        let a = Fingerprint::of("first");
        let b = Fingerprint::of("second");
        let archive = format!(
            "**[!] X ALERT: one**\n...\n{}\n\nsome chatter `post_id=short`\n**[!] Y ALERT: two**\n{}",
            a.annotation(),
            b.annotation()
        );

        assert_eq!(Fingerprint::scan_annotations(&archive), vec![a, b]);
    }

    #[test]
    fn test_scan_annotations_unterminated() {
        assert!(Fingerprint::scan_annotations("`post_id=abc").is_empty());
    }
}
