// src/extract/markdown.rs
// =============================================================================
// This module renders markdown text to HTML.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// The archived pages are markdown source, but links and images are easiest
// to pick out of the rendered form, where every reference is a plain <a> or
// <img> element no matter which markdown syntax produced it (inline,
// reference-style, autolink, or raw HTML in the source).
// =============================================================================

use pulldown_cmark::{html, Parser};

// Renders markdown text to an HTML fragment
//
// Parameters:
//   markdown: the markdown source text (borrowed as &str)
//
// Returns: the rendered HTML as a String
pub fn render_markdown(markdown: &str) -> String {
    // The parser is an iterator of events; push_html consumes it and
    // writes the rendered output into the buffer
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_link_to_anchor() {
        let html = render_markdown("See [next page](/page2) for more.");
        assert!(html.contains(r#"<a href="/page2">next page</a>"#));
    }

    #[test]
    fn test_renders_image_with_alt() {
        let html = render_markdown("![diagram](https://example.com/img/pic.png)");
        assert!(html.contains(r#"src="https://example.com/img/pic.png""#));
        assert!(html.contains(r#"alt="diagram""#));
    }

    #[test]
    fn test_reference_style_link_renders_too() {
        let html = render_markdown("[docs][1]\n\n[1]: https://example.com/docs\n");
        assert!(html.contains(r#"<a href="https://example.com/docs">docs</a>"#));
    }
}
