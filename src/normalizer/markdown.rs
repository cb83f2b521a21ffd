//! Best-effort HTML to markdown conversion for feed summaries.
//!
//! Feed markup is frequently truncated or hand-written, so the converter never
//! rejects input: unknown tags are dropped with their text kept, a `<` that
//! does not open a tag is treated as text, and unclosed elements simply end
//! with the input.

use html_escape::decode_html_entities;

/// Convert a fragment of HTML into lightly formatted markdown text.
pub fn html_to_markdown(html: &str) -> String {
    let mut converter = Converter::default();
    let mut rest = html;

    while !rest.is_empty() {
        let Some(open) = rest.find('<') else {
            converter.text(rest);
            break;
        };

        converter.text(&rest[..open]);
        rest = &rest[open..];

        if rest.starts_with("<!--") {
            match rest.find("-->") {
                Some(end) => {
                    rest = &rest[end + 3..];
                    continue;
                }
                None => break,
            }
        }

        let Some(close) = rest.find('>') else {
            converter.text(rest);
            break;
        };

        match Tag::parse(&rest[1..close]) {
            Some(tag) => converter.tag(&tag),
            None => converter.text(&rest[..=close]),
        }
        rest = &rest[close + 1..];
    }

    converter.finish()
}

#[derive(Debug)]
struct Tag {
    name: String,
    closing: bool,
    self_closing: bool,
    raw: String,
}

impl Tag {
    /// Parse the text between `<` and `>`. `None` means it was not a tag.
    fn parse(inner: &str) -> Option<Tag> {
        let first = inner.chars().next()?;
        if first == '!' || first == '?' {
            // Doctype, CDATA or processing instruction: swallow it.
            return Some(Tag {
                name: String::new(),
                closing: false,
                self_closing: true,
                raw: String::new(),
            });
        }

        let (closing, body) = match inner.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, inner),
        };

        if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }

        let name: String = body
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Some(Tag {
            raw: body[name.len()..].to_string(),
            self_closing: body.trim_end().ends_with('/'),
            name,
            closing,
        })
    }

    fn attr(&self, name: &str) -> Option<String> {
        let lower = self.raw.to_ascii_lowercase();
        let pattern = format!("{}=", name);
        let mut from = 0;

        while let Some(found) = lower[from..].find(&pattern) {
            let start = from + found;
            from = start + pattern.len();

            let preceded_by_space = lower[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
            if !preceded_by_space {
                continue;
            }

            let value = &self.raw[from..];
            let value = match value.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = &value[1..];
                    &inner[..inner.find(quote).unwrap_or(inner.len())]
                }
                _ => {
                    let end = value
                        .find(|c: char| c.is_whitespace() || c == '/')
                        .unwrap_or(value.len());
                    &value[..end]
                }
            };
            return Some(decode_html_entities(value.trim()).to_string());
        }

        None
    }
}

#[derive(Debug)]
enum List {
    Unordered,
    Ordered(usize),
}

#[derive(Debug)]
struct Link {
    start: usize,
    href: Option<String>,
}

#[derive(Debug, Default)]
struct Converter {
    out: String,
    links: Vec<Link>,
    lists: Vec<List>,
    skip_depth: usize,
    pre_depth: usize,
}

impl Converter {
    fn text(&mut self, raw: &str) {
        if self.skip_depth > 0 || raw.is_empty() {
            return;
        }

        let decoded = decode_html_entities(raw);
        if self.pre_depth > 0 {
            self.out.push_str(&decoded);
            return;
        }

        let mut last_was_space = self.out.is_empty() || self.out.ends_with(char::is_whitespace);
        for c in decoded.chars() {
            if c.is_whitespace() {
                if !last_was_space {
                    self.out.push(' ');
                    last_was_space = true;
                }
            } else {
                self.out.push(c);
                last_was_space = false;
            }
        }
    }

    fn tag(&mut self, tag: &Tag) {
        let name = tag.name.as_str();

        if matches!(name, "script" | "style") {
            if tag.self_closing {
                return;
            }
            if tag.closing {
                self.skip_depth = self.skip_depth.saturating_sub(1);
            } else {
                self.skip_depth += 1;
            }
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            "p" | "div" | "section" | "article" | "header" | "footer" | "blockquote" | "table"
            | "dl" => self.block(),
            "tr" | "dt" | "dd" => self.line_break(),
            "td" | "th" if !tag.closing => self.text(" "),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.block();
                if !tag.closing {
                    let level = name[1..].parse().unwrap_or(1);
                    self.out.push_str(&"#".repeat(level));
                    self.out.push(' ');
                }
            }
            "br" => self.line_break(),
            "hr" => {
                self.block();
                self.out.push_str("---");
                self.block();
            }
            "strong" | "b" => self.out.push_str("**"),
            "em" | "i" => self.out.push('*'),
            "code" | "kbd" | "tt" if self.pre_depth == 0 => self.out.push('`'),
            "a" => self.link(tag),
            "img" => self.image(tag),
            "ul" | "ol" => self.list(tag),
            "li" if !tag.closing => self.list_item(),
            "pre" => {
                if tag.closing {
                    self.pre_depth = self.pre_depth.saturating_sub(1);
                    if !self.out.ends_with('\n') {
                        self.out.push('\n');
                    }
                    self.out.push_str("```");
                    self.block();
                } else {
                    self.block();
                    self.out.push_str("```\n");
                    self.pre_depth += 1;
                }
            }
            _ => {}
        }
    }

    fn link(&mut self, tag: &Tag) {
        if !tag.closing {
            self.links.push(Link {
                start: self.out.len(),
                href: tag.attr("href").filter(|href| !href.is_empty()),
            });
            return;
        }

        let Some(link) = self.links.pop() else {
            return;
        };
        let text = self.out.get(link.start..).unwrap_or_default().trim().to_string();
        self.out.truncate(link.start);

        match link.href {
            Some(href) if text.is_empty() => self.out.push_str(&href),
            Some(href) if text == href => {
                self.out.push('<');
                self.out.push_str(&href);
                self.out.push('>');
            }
            Some(href) => {
                self.out.push('[');
                self.out.push_str(&text);
                self.out.push_str("](");
                self.out.push_str(&href);
                self.out.push(')');
            }
            None => self.out.push_str(&text),
        }
    }

    fn image(&mut self, tag: &Tag) {
        if let Some(src) = tag.attr("src").filter(|src| !src.is_empty()) {
            let alt = tag.attr("alt").unwrap_or_default();
            self.out.push_str(&format!("![{}]({})", alt, src));
        }
    }

    fn list(&mut self, tag: &Tag) {
        if tag.closing {
            self.lists.pop();
            if self.lists.is_empty() {
                self.block();
            } else {
                self.line_break();
            }
            return;
        }

        if self.lists.is_empty() {
            self.block();
        }
        self.lists.push(if tag.name == "ol" {
            List::Ordered(0)
        } else {
            List::Unordered
        });
    }

    fn list_item(&mut self) {
        self.line_break();
        let depth = self.lists.len().max(1);
        self.out.push_str(&"  ".repeat(depth - 1));

        match self.lists.last_mut() {
            Some(List::Ordered(n)) => {
                *n += 1;
                self.out.push_str(&format!("{}. ", n));
            }
            _ => self.out.push_str("* "),
        }
    }

    fn trim_trailing_spaces(&mut self) {
        let trimmed = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(trimmed);

        // Open links may have started inside the trimmed run.
        for link in &mut self.links {
            link.start = link.start.min(trimmed);
        }
    }

    /// Ensure the output ends at the start of a new line.
    fn line_break(&mut self) {
        self.trim_trailing_spaces();
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Ensure the output ends with a blank line separating blocks.
    fn block(&mut self) {
        self.trim_trailing_spaces();
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn finish(self) -> String {
        let mut result = String::with_capacity(self.out.len());
        let mut blank_run = 0;

        for line in self.out.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            result.push_str(line);
            result.push('\n');
        }

        result.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(html_to_markdown("hello world"), "hello world");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(html_to_markdown("  hello \n\t world  "), "hello world");
    }

    #[test]
    fn test_paragraphs_become_blocks() {
        assert_eq!(
            html_to_markdown("<p>First</p><p>Second</p>"),
            "First\n\nSecond"
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            html_to_markdown("<h3>Summary</h3><p>Body</p>"),
            "### Summary\n\nBody"
        );
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            html_to_markdown("<b>bold</b> and <em>italic</em> and <code>x()</code>"),
            "**bold** and *italic* and `x()`"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            html_to_markdown(r#"See <a href="https://example.com/a">the advisory</a>."#),
            "See [the advisory](https://example.com/a)."
        );
        assert_eq!(
            html_to_markdown(r#"<a href='https://example.com'>https://example.com</a>"#),
            "<https://example.com>"
        );
        assert_eq!(html_to_markdown("<a>no href</a>"), "no href");
    }

    #[test]
    fn test_link_href_entities_decoded() {
        assert_eq!(
            html_to_markdown(r#"<a class="x" href="https://e.com/?a=1&amp;b=2">q</a>"#),
            "[q](https://e.com/?a=1&b=2)"
        );
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(html_to_markdown("AT&amp;T &lt;3 &quot;x&quot;"), "AT&T <3 \"x\"");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            html_to_markdown("<p>Affected:</p><ul><li>one</li><li>two</li></ul><p>End</p>"),
            "Affected:\n\n* one\n* two\n\nEnd"
        );
        assert_eq!(
            html_to_markdown("<ol><li>first</li><li>second</li></ol>"),
            "1. first\n2. second"
        );
    }

    #[test]
    fn test_nested_list_indent() {
        assert_eq!(
            html_to_markdown("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"),
            "* a\n  * b\n* c"
        );
    }

    #[test]
    fn test_script_and_style_dropped() {
        assert_eq!(
            html_to_markdown("<style>p{}</style>keep<script>alert(1)</script> this"),
            "keep this"
        );
    }

    #[test]
    fn test_comments_and_doctype_dropped() {
        assert_eq!(html_to_markdown("<!DOCTYPE html><!-- hidden -->shown"), "shown");
    }

    #[test]
    fn test_br_and_hr() {
        assert_eq!(html_to_markdown("a<br>b<br/>c"), "a\nb\nc");
        assert_eq!(html_to_markdown("a<hr>b"), "a\n\n---\n\nb");
    }

    #[test]
    fn test_pre_keeps_whitespace() {
        assert_eq!(
            html_to_markdown("<pre>fn main() {\n    run();\n}</pre>"),
            "```\nfn main() {\n    run();\n}\n```"
        );
    }

    #[test]
    fn test_malformed_markup_is_best_effort() {
        assert_eq!(html_to_markdown("a < b and c > d"), "a < b and c > d");
        assert_eq!(html_to_markdown("<p>unterminated <b"), "unterminated <b");
        assert_eq!(html_to_markdown("</div></a>stray closers"), "stray closers");
        assert_eq!(html_to_markdown("open <!-- comment"), "open");
    }

    #[test]
    fn test_break_inside_link_after_trailing_spaces() {
        assert_eq!(
            html_to_markdown("<pre>x  <a href=\"h\"><br></a></pre>"),
            "```\nxh\n```"
        );
        assert_eq!(
            html_to_markdown("<p>a <a href='u'><p>b</p></a>"),
            "a[b](u)"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            html_to_markdown(r#"<img src="https://e.com/i.png" alt="chart">"#),
            "![chart](https://e.com/i.png)"
        );
    }

    #[test]
    fn test_unknown_tags_keep_text() {
        assert_eq!(html_to_markdown("<span class=\"x\">inner</span> text"), "inner text");
    }
}
