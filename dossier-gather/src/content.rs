//! Text extraction from rendered HTML.
//!
//! Parses the rendered document, drops non-content subtrees (scripts,
//! styles, navigation, header, footer), and flattens the remaining text
//! into a single whitespace-collapsed line suitable for LLM consumption.

use scraper::{Html, Node};

/// Default maximum characters kept from one page.
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Elements whose entire subtree is discarded before text is collected.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "template", "svg", "iframe",
];

/// Extract flat plain text from rendered HTML.
///
/// Every whitespace run (including newlines) becomes a single space and the
/// result is trimmed. The text is capped at `max_chars` characters.
/// Returns an empty string when nothing survives.
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let raw = visible_text(&document);
    let text = collapse_whitespace(&raw);
    truncate_to_limit(text, max_chars)
}

/// Concatenate every text node that is not inside a skipped element.
fn visible_text(document: &Html) -> String {
    let mut out = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let skipped = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if skipped {
            continue;
        }

        out.push_str(text);
        // Adjacent block elements have no whitespace between their text nodes.
        out.push(' ');
    }

    out
}

/// Collapse all whitespace runs into single spaces and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text to at most `max_chars` characters.
fn truncate_to_limit(mut text: String, max_chars: usize) -> String {
    let Some((end, _)) = text.char_indices().nth(max_chars) else {
        return text;
    };

    text.truncate(end);
    let trimmed_len = text.trim_end().len();
    text.truncate(trimmed_len);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> String {
        extract_text(html, DEFAULT_MAX_CHARS)
    }

    #[test]
    fn body_text_is_extracted() {
        let text = extract("<html><body><p>Body content only</p></body></html>");
        assert_eq!(text, "Body content only");
    }

    #[test]
    fn strip_script_and_style() {
        let html = r#"<html><head><style>.foo { color: red; }</style></head><body>
            <p>Real content</p>
            <script>var x = 1; alert('hi');</script>
        </body></html>"#;
        let text = extract(html);
        assert_eq!(text, "Real content");
    }

    #[test]
    fn strip_nav_header_footer() {
        let html = r#"<html><body>
            <header>Header content</header>
            <nav>Nav links</nav>
            <main>Main content</main>
            <footer>Footer info</footer>
        </body></html>"#;
        let text = extract(html);
        assert_eq!(text, "Main content");
    }

    #[test]
    fn strip_noscript_and_iframe() {
        let html = r#"<html><body>
            <p>Visible content</p>
            <noscript>Enable JS please</noscript>
            <iframe src="ad.html">Ad frame</iframe>
        </body></html>"#;
        let text = extract(html);
        assert!(text.contains("Visible content"));
        assert!(!text.contains("Enable JS"));
        assert!(!text.contains("Ad frame"));
    }

    #[test]
    fn nested_skipped_elements_are_dropped() {
        let html = r#"<html><body>
            <header><div><span>Deep header text</span></div></header>
            <article><p>Article text</p></article>
        </body></html>"#;
        let text = extract(html);
        assert_eq!(text, "Article text");
    }

    #[test]
    fn nav_tag_not_confused_with_similar_text() {
        let html = "<html><body><nav>Skip this</nav><p>Keep this navigate text</p></body></html>";
        let text = extract(html);
        assert!(!text.contains("Skip this"));
        assert!(text.contains("navigate text"));
    }

    #[test]
    fn whitespace_and_newlines_collapse_to_single_spaces() {
        let html = "<html><body><p>Word1    Word2\n\n\n\n\nWord3</p>\t<p>  Word4 </p></body></html>";
        let text = extract(html);
        assert_eq!(text, "Word1 Word2 Word3 Word4");
    }

    #[test]
    fn adjacent_blocks_do_not_glue_words() {
        let text = extract("<html><body><div>alpha</div><div>beta</div></body></html>");
        assert_eq!(text, "alpha beta");
    }

    #[test]
    fn empty_html_yields_empty_text() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn only_scripts_and_styles_yields_empty_text() {
        let html = r#"<html>
            <head><style>body{color:red}</style></head>
            <body>
                <script>console.log('hello');</script>
                <style>.hidden{display:none}</style>
            </body>
        </html>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn whitespace_only_body_yields_empty_text() {
        assert!(extract("<html><body>   \n\n\n   </body></html>").is_empty());
    }

    #[test]
    fn huge_text_truncated_at_limit() {
        let body = "lorem ".repeat(50_000);
        let html = format!("<html><body><p>{body}</p></body></html>");
        let text = extract_text(&html, 1000);
        assert!(text.chars().count() <= 1000);
        assert!(text.starts_with("lorem lorem"));
        assert!(!text.ends_with(' '));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "Hello ".to_owned() + &"é".repeat(200);
        let html = format!("<html><body>{body}</body></html>");
        let text = extract_text(&html, 50);
        assert_eq!(text.chars().count(), 50);
        assert!(text.starts_with("Hello é"));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let html = format!("<html><body><p>{}</p></body></html>", "経済".repeat(100));
        let text = extract_text(&html, 120);
        assert_eq!(text.chars().count(), 120);
        assert!(text.len() > 120);
    }

    #[test]
    fn collapse_whitespace_trims() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn default_max_chars_constant() {
        assert_eq!(DEFAULT_MAX_CHARS, 100_000);
    }
}
