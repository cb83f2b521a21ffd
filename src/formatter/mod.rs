use crate::domain::FeedFields;

/// Render the standardized announcement for one feed entry.
///
/// ```text
/// **[!] {publisher} ALERT: {title}**
/// *Published {published_at}*
///
/// > {excerpt}
///
/// *Read more at {link}*
///
/// ```
///
/// Field values are inserted verbatim. The layout, including the trailing
/// blank line, is what downstream chat surfaces render, so it must not drift.
pub fn format_post(fields: &FeedFields) -> String {
    let mut post = String::with_capacity(
        64 + fields.publisher.len()
            + fields.title.len()
            + fields.published_at.len()
            + fields.excerpt.len()
            + fields.link.len(),
    );

    post.push_str(&format!("**[!] {} ALERT: ", fields.publisher));
    post.push_str(&format!("{}**\n", fields.title));
    post.push_str(&format!("*Published {}*\n\n", fields.published_at));
    post.push_str(&format!("> {}\n\n", fields.excerpt));
    post.push_str(&format!("*Read more at {}*\n\n", fields.link));
    post
}
