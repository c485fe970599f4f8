use crate::listing::{Compensation, CompensationInterval};
use regex::Regex;
use std::sync::LazyLock;

/// Currency assumed for every `$` amount
pub const DEFAULT_CURRENCY: &str = "USD";

// "$100k", "$100K", "$95,000", "$72.5k"; percentages carry no "$" and never match
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\d[\d,]*(?:\.\d+)?)([kK])?").expect("static regex is valid")
});

/// Parses a free-text compensation range
///
/// The first monetary token is the minimum, the second (if any) the
/// maximum. Amounts with a `k` suffix are multiplied by 1000. Returns `None`
/// when the text holds no monetary token.
///
/// # Examples
///
/// ```
/// use jobgraph::listing::parse_compensation;
///
/// let comp = parse_compensation("$80K - $120K · 0.01% - 0.1%").unwrap();
/// assert_eq!(comp.min_amount, 80_000.0);
/// assert_eq!(comp.max_amount, 120_000.0);
/// ```
pub fn parse_compensation(text: &str) -> Option<Compensation> {
    let mut amounts = AMOUNT_RE.captures_iter(text).map(|caps| {
        let digits = caps[1].replace(',', "");
        let multiplier = if caps.get(2).is_some() { 1000.0 } else { 1.0 };
        digits.parse::<f64>().ok().map(|n| n * multiplier)
    });

    let min_amount = amounts.next()??;
    let max_amount = amounts.next().flatten().unwrap_or(min_amount);

    Some(Compensation {
        min_amount,
        max_amount,
        currency: DEFAULT_CURRENCY.to_string(),
        interval: CompensationInterval::Yearly,
    })
}
