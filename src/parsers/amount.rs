use crate::models::DEFAULT_CURRENCY;
use regex::Regex;
use std::sync::LazyLock;

/// Currency markers in match priority order
pub const CURRENCY_TOKENS: [&str; 5] = ["NGN", "N", "₦", "USD", "$"];

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d,]+").unwrap());

/// Price amount and currency recovered from a price text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceParts {
    pub amount: Option<u64>,
    pub currency: &'static str,
}

/// First run of digits and thousands separators, as an integer
pub fn first_number(text: &str) -> Option<u64> {
    let run = DIGIT_RUN.find(text)?;
    run.as_str().replace(',', "").parse().ok()
}

/// Parse `"NGN 5,500,000"`, `"₦3,200,000"`, `"$12,000"` and the like.
/// Currency falls back to NGN when no marker is present.
pub fn parse_price(text: &str) -> PriceParts {
    let currency = CURRENCY_TOKENS
        .iter()
        .copied()
        .find(|token| text.contains(token))
        .unwrap_or(DEFAULT_CURRENCY);

    PriceParts {
        amount: first_number(text),
        currency,
    }
}

/// Parse `"85,000 km"` into 85000
pub fn parse_mileage(text: &str) -> Option<u64> {
    first_number(text)
}
