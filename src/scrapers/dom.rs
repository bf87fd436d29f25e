use scraper::{ElementRef, Selector};
use tracing::debug;

/// Lenient element queries.
///
/// An unparsable selector matches nothing instead of failing, so a broken
/// candidate in a fallback table only costs that candidate.
pub trait NodeExt<'a> {
    fn query(&self, selector: &str) -> Option<ElementRef<'a>>;
    fn query_all(&self, selector: &str) -> Vec<ElementRef<'a>>;
    fn attribute(&self, name: &str) -> Option<String>;
    /// Trimmed text content, `None` when blank
    fn text_content(&self) -> Option<String>;
}

impl<'a> NodeExt<'a> for ElementRef<'a> {
    fn query(&self, selector: &str) -> Option<ElementRef<'a>> {
        let selector = parse_selector(selector)?;
        self.select(&selector).next()
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef<'a>> {
        match parse_selector(selector) {
            Some(selector) => self.select(&selector).collect(),
            None => Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn text_content(&self) -> Option<String> {
        let text = self.text().collect::<String>();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("Skipping invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}
