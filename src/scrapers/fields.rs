//! Selector fallback tables for listing cards.
//!
//! Class names on the site are generated and drift between deploys, so each
//! field is looked up through an ordered list of candidate selectors, from the
//! most specific to the most generic. A candidate only wins when the value it
//! yields also looks like the field (the content gate), which keeps a generic
//! `p` or `span` from being taken for a price or a location.
//! Update these tables when extraction starts missing fields.

use super::dom::NodeExt;
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

/// Which matches of a candidate selector are examined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    First,
    All,
}

/// One field's cascade: candidates, how to read a match, and the gate
pub struct FieldRule {
    pub name: &'static str,
    pub selectors: &'static [&'static str],
    pub scope: Scope,
    pub read: fn(&ElementRef<'_>) -> Option<String>,
    pub gate: fn(&str) -> bool,
}

impl FieldRule {
    /// First value that a candidate yields and the gate accepts
    pub fn extract(&self, card: &ElementRef<'_>) -> Option<String> {
        for selector in self.selectors {
            let matches: Vec<ElementRef<'_>> = match self.scope {
                Scope::First => card.query(selector).into_iter().collect(),
                Scope::All => card.query_all(selector),
            };

            let found = matches
                .iter()
                .filter_map(|element| (self.read)(element))
                .find(|value| (self.gate)(value));

            if found.is_some() {
                return found;
            }
        }
        None
    }
}

/// Cities accepted as a listing location
pub const GAZETTEER: &[&str] = &[
    "Lagos", "Abuja", "Kano", "Ibadan", "Port Harcourt", "Benin", "Jos", "Ilorin",
    "Kaduna", "Oyo", "Enugu", "Abeokuta", "Zaria", "Aba", "Maiduguri", "Warri",
    "Ebute Ikorodu", "Sokoto", "Onitsha", "Calabar", "Uyo", "Katsina", "Ado Ekiti",
    "Gombe", "Minna", "Effon Alaiye", "Ikeja", "Victoria Island", "Lekki", "Yaba",
    "Surulere",
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static CSS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(["']?([^"')]+)["']?\)"#).unwrap());

pub static TITLE: FieldRule = FieldRule {
    name: "title",
    selectors: &[
        "h6.MuiTypography-root.MuiTypography-h6.css-1g399u0",
        "h6.MuiTypography-h6",
        r#"h6[class*="MuiTypography"]"#,
        "h6",
        r#"[class*="Typography"] h6"#,
    ],
    scope: Scope::First,
    read: read_text,
    gate: accept_any,
};

pub static PRICE: FieldRule = FieldRule {
    name: "price",
    selectors: &[
        "p.MuiTypography-root.MuiTypography-body1.css-1bztvjj",
        "p.MuiTypography-body1",
        r#"p[class*="MuiTypography"]"#,
        r#"p[class*="price"]"#,
        r#"[class*="price"]"#,
        "p",
    ],
    scope: Scope::First,
    read: read_text,
    gate: looks_like_price,
};

pub static MILEAGE: FieldRule = FieldRule {
    name: "mileage",
    selectors: &[
        "span.MuiChip-label.MuiChip-labelSmall.css-1pjtbja",
        "span.MuiChip-label",
        r#"span[class*="MuiChip"]"#,
        r#"span[class*="chip"]"#,
        r#"[class*="mileage"]"#,
    ],
    scope: Scope::First,
    read: read_text,
    gate: looks_like_mileage,
};

pub static LOCATION: FieldRule = FieldRule {
    name: "location",
    selectors: &[
        "span.MuiTypography-root.MuiTypography-caption.css-umr6w4",
        "span.MuiTypography-caption",
        r#"span[class*="MuiTypography-caption"]"#,
        r#"span[class*="caption"]"#,
        r#"[class*="location"]"#,
    ],
    scope: Scope::First,
    read: read_text,
    gate: looks_like_location,
};

/// Yields the raw image reference; resolving it is up to the caller
pub static THUMBNAIL: FieldRule = FieldRule {
    name: "thumbnail",
    selectors: &[r#"img[src*="http"]"#, "img", r#"[style*="background-image"]"#],
    scope: Scope::First,
    read: read_image_ref,
    gate: accept_any,
};

pub static POSTED_AT: FieldRule = FieldRule {
    name: "created_at",
    selectors: &[
        "time",
        "[datetime]",
        r#"[class*="date"]"#,
        r#"[class*="time"]"#,
        "span[title]",
        "div[title]",
    ],
    scope: Scope::All,
    read: read_posted_at,
    gate: accept_any,
};

fn read_text(element: &ElementRef<'_>) -> Option<String> {
    element.text_content()
}

fn read_image_ref(element: &ElementRef<'_>) -> Option<String> {
    if let Some(src) = element.attribute("src") {
        if src.contains("http") || src.starts_with("//") {
            return Some(src);
        }
    }

    let style = element.attribute("style")?;
    if !style.contains("background-image") {
        return None;
    }
    CSS_URL
        .captures(&style)
        .map(|caps| caps[1].trim().to_string())
}

fn read_posted_at(element: &ElementRef<'_>) -> Option<String> {
    if let Some(datetime) = element.attribute("datetime").filter(|d| !d.is_empty()) {
        return Some(datetime);
    }

    if let Some(title) = element.attribute("title") {
        if title.contains("ago")
            || title.to_lowercase().contains("posted")
            || mentions_month(&title)
        {
            return Some(title.trim().to_string());
        }
    }

    element
        .text_content()
        .filter(|text| text.contains("ago") || mentions_month(text))
}

fn mentions_month(text: &str) -> bool {
    MONTHS.iter().any(|month| text.contains(month))
}

fn accept_any(_: &str) -> bool {
    true
}

/// Carries a naira marker, or is nothing but digits and separators
pub fn looks_like_price(text: &str) -> bool {
    if text.contains('₦') || text.contains("NGN") {
        return true;
    }
    let digits = text.replace([',', '.'], "");
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn looks_like_mileage(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("km") || lower.contains("mile")
}

/// Known city, or short enough to be a place name
pub fn looks_like_location(text: &str) -> bool {
    let lower = text.to_lowercase();
    GAZETTEER
        .iter()
        .any(|city| lower.contains(&city.to_lowercase()))
        || text.split_whitespace().count() <= 3
}
