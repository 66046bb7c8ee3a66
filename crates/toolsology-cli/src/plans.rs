//! Offline plan-code decoding.

use rust_decimal::Decimal;
use toolsology_core::{plan_description, unit_price_label, DurationCode, PlanTerm};

/// Decode `code` as a `duration_months` value and print what the storefront
/// would show for it.
pub(crate) fn run_decode(code: &str, price: Option<Decimal>, currency: &str) {
    for line in describe(code, price, currency) {
        println!("{line}");
    }
}

fn describe(code: &str, price: Option<Decimal>, currency: &str) -> Vec<String> {
    let code = DurationCode::from(code);
    let term = PlanTerm::decode(Some(&code));
    let duration = term.decoded();

    let mut lines = vec![
        format!("code:        {code}"),
        format!("duration:    {}", duration.display_duration),
        format!("type:        {}", duration.duration_type),
        format!("value:       {}", duration.duration_value),
        format!("description: {}", plan_description(term)),
    ];
    if price.is_some() {
        lines.push(format!(
            "rate:        {}",
            unit_price_label(price, &duration, currency).unwrap_or_else(|| "-".to_owned())
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_yearly_code() {
        let lines = describe("2002", Some(Decimal::from(9000)), "PKR");
        assert_eq!(lines[1], "duration:    2 years");
        assert_eq!(lines[2], "type:        yearly");
        assert_eq!(lines[5], "rate:        ≈ PKR 4500.00 / year");
    }

    #[test]
    fn describe_lifetime_code_without_price() {
        let lines = describe("20010", None, "PKR");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "duration:    Lifetime");
        assert_eq!(lines[3], "value:       9999");
    }
}
