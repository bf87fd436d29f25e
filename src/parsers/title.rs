use std::ops::RangeInclusive;

/// Model years accepted as a year token
pub const YEAR_RANGE: RangeInclusive<u16> = 1980..=2030;

/// Fields recovered from a listing title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleParts {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub variant: Option<String>,
}

/// Split a free-text title into make, model, year and variant.
///
/// Handles both `MAKE MODEL [..] YEAR [..]` and `YEAR MAKE MODEL [..]`.
/// Titles with fewer than two tokens leave make and model unset.
pub fn parse_title(title: &str) -> TitleParts {
    let parts: Vec<&str> = title.split_whitespace().collect();
    let mut out = TitleParts::default();

    let year_index = parts.iter().position(|part| parse_year(part).is_some());
    out.year = year_index.and_then(|i| parse_year(parts[i]));

    match year_index {
        Some(0) if parts.len() >= 3 => {
            out.make = Some(parts[1].to_string());
            out.model = Some(parts[2].to_string());
            out.variant = join(&parts[3..]);
        }
        _ if parts.len() >= 2 => {
            out.make = Some(parts[0].to_string());
            out.model = Some(parts[1].to_string());

            out.variant = match year_index {
                Some(i) if i > 1 => {
                    let segments: Vec<String> = [join(&parts[2..i]), join(&parts[i + 1..])]
                        .into_iter()
                        .flatten()
                        .collect();
                    (!segments.is_empty()).then(|| segments.join(" "))
                }
                Some(_) => None,
                None => join(&parts[2..]),
            };
        }
        _ => {}
    }

    out
}

fn parse_year(token: &str) -> Option<u16> {
    if token.len() != 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|year| YEAR_RANGE.contains(year))
}

fn join(parts: &[&str]) -> Option<String> {
    (!parts.is_empty()).then(|| parts.join(" "))
}
