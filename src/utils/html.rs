// src/utils/html.rs

//! Element-level helpers over `scraper` trees.

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};

/// Elements that start and end a line of rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Parse a CSS selector.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// First descendant of `element` matching `css`.
pub fn select_first<'a>(element: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    element
        .select(&selector)
        .next()
        .ok_or_else(|| AppError::not_found(css))
}

/// All descendants of `element` matching `css`, in document order.
pub fn select_all<'a>(element: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = parse_selector(css)?;
    Ok(element.select(&selector).collect())
}

/// The element's `class` attribute, trimmed; empty when absent.
pub fn class_attr<'a>(element: ElementRef<'a>) -> &'a str {
    element.value().attr("class").unwrap_or("").trim()
}

/// Anchor text and resolved `href` of a link element.
pub fn link(anchor: ElementRef<'_>, base: &url::Url) -> Option<(String, String)> {
    let href = anchor.value().attr("href")?;
    Some((inner_text(anchor), crate::utils::resolve_url(base, href)))
}

/// Element siblings that follow `element`, nearest first.
pub fn following_siblings<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Text as a browser would render it.
///
/// Block elements and `<br>` break lines; whitespace within a line collapses to
/// single spaces; blank lines are dropped.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    raw.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            match name {
                "br" => out.push('\n'),
                "script" | "style" | "template" => {}
                _ => {
                    let block = BLOCK_ELEMENTS.contains(&name);
                    if block {
                        out.push('\n');
                    }
                    collect_text(child_element, out);
                    if block {
                        out.push('\n');
                    }
                }
            }
        } else if let Some(text) = child.value().as_text() {
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn root(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    #[test]
    fn inner_text_collapses_inline_whitespace() {
        let doc = root("<p>Linear\n     <b>Algebra</b>  and   Geometry</p>");
        assert_eq!(inner_text(doc.root_element()), "Linear Algebra and Geometry");
    }

    #[test]
    fn inner_text_breaks_on_blocks_and_br() {
        let doc = root("<div><div>Autumn 2023: P1 (3.5 hp)</div><div>P2 (4 hp)</div>x<br>y</div>");
        assert_eq!(
            inner_text(doc.root_element()),
            "Autumn 2023: P1 (3.5 hp)\nP2 (4 hp)\nx\ny"
        );
    }

    #[test]
    fn inner_text_skips_scripts() {
        let doc = root("<div>shown<script>var hidden = 1;</script></div>");
        assert_eq!(inner_text(doc.root_element()), "shown");
    }

    #[test]
    fn following_siblings_skip_text_nodes() {
        let doc = root("<div><h3 class='t4'>A</h3> text <p>one</p><p class=' row '>two</p></div>");
        let h3 = select_first(doc.root_element(), "h3").unwrap();
        let siblings: Vec<_> = following_siblings(h3).collect();

        assert_eq!(siblings.len(), 2);
        assert_eq!(class_attr(siblings[0]), "");
        assert_eq!(class_attr(siblings[1]), "row");
    }

    #[test]
    fn select_first_reports_missing_selector() {
        let doc = root("<div></div>");
        let err = select_first(doc.root_element(), "#missing").unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn parse_selector_rejects_garbage() {
        assert!(parse_selector("[[invalid").is_err());
        assert!(parse_selector("tr:nth-child(2) > td").is_ok());
    }
}
