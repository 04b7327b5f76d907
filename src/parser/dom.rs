use std::sync::LazyLock;

use scraper::{ElementRef, Node, Selector};

fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

pub static MAINTITLE: LazyLock<Selector> = LazyLock::new(|| sel("a.maintitle"));
pub static GENSMALL: LazyLock<Selector> = LazyLock::new(|| sel("span.gensmall"));
pub static POSTBODY: LazyLock<Selector> = LazyLock::new(|| sel("span.postbody"));
pub static GEN: LazyLock<Selector> = LazyLock::new(|| sel("span.gen"));
pub static CATTITLE: LazyLock<Selector> = LazyLock::new(|| sel("span.cattitle"));
pub static BOLD: LazyLock<Selector> = LazyLock::new(|| sel("b"));
pub static ITALIC: LazyLock<Selector> = LazyLock::new(|| sel("i"));
pub static TR: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
pub static TD: LazyLock<Selector> = LazyLock::new(|| sel("td"));
pub static TD_GENSMALL: LazyLock<Selector> = LazyLock::new(|| sel("td.gensmall"));

/// All descendant text, trimmed.
pub fn text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first `selector` match under `el`, or empty.
pub fn first_text(el: ElementRef, selector: &Selector) -> String {
    el.select(selector).next().map(text).unwrap_or_default()
}

/// The element's single string: its only child is a text node, or an element
/// that itself has a single string. Mixed content has none.
pub fn single_string<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(t) => Some(&**t),
        Node::Element(_) => single_string(ElementRef::wrap(only)?),
        _ => None,
    }
}

/// Closest ancestor element with the given tag name.
pub fn ancestor<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == tag)
}

/// First following sibling element accepted by `pred`.
pub fn next_sibling_where<'a, F>(el: ElementRef<'a>, pred: F) -> Option<ElementRef<'a>>
where
    F: Fn(&ElementRef<'a>) -> bool,
{
    el.next_siblings().filter_map(ElementRef::wrap).find(|s| pred(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&sel(css)).next().unwrap()
    }

    #[test]
    fn single_string_through_wrappers() {
        let doc = Html::parse_fragment("<span id=a><b>18:00</b></span><span id=b>x <b>y</b></span>");
        assert_eq!(single_string(first(&doc, "#a")), Some("18:00"));
        assert_eq!(single_string(first(&doc, "#b")), None);
    }

    #[test]
    fn text_is_trimmed_and_flattened() {
        let doc = Html::parse_fragment("<span id=a>  Custom <br> speech\n</span>");
        assert_eq!(text(first(&doc, "#a")), "Custom  speech");
    }

    #[test]
    fn siblings_skip_non_matching() {
        let doc = Html::parse_fragment(
            r#"<div><span id=h>Next</span><br><span class="other">a</span><span class="gensmall">b</span></div>"#,
        );
        let h = first(&doc, "#h");
        let found = next_sibling_where(h, |s| GENSMALL.matches(s)).map(text);
        assert_eq!(found.as_deref(), Some("b"));
        assert!(ancestor(h, "div").is_some());
        assert!(ancestor(h, "table").is_none());
    }
}
