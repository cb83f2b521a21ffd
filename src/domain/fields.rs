/// The five semantic fields a feed adapter extracts from its newest entry.
///
/// Values are carried verbatim; `published_at` is the feed's own date text and
/// `excerpt` is the already-normalized quote body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFields {
    pub publisher: String,
    pub title: String,
    pub published_at: String,
    pub excerpt: String,
    pub link: String,
}

impl FeedFields {
    pub fn new(
        publisher: impl Into<String>,
        title: impl Into<String>,
        published_at: impl Into<String>,
        excerpt: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            title: title.into(),
            published_at: published_at.into(),
            excerpt: excerpt.into(),
            link: link.into(),
        }
    }
}
