//! Plan duration decoding and the labels derived from it.
//!
//! The storefront API packs both the kind of a plan and its length into one
//! integer, `duration_months`:
//!
//! | code            | meaning                       |
//! |-----------------|-------------------------------|
//! | absent          | 1 month                       |
//! | `20010`, `0`    | lifetime                      |
//! | `200<n>`        | `n` years                     |
//! | `100<n>`, `100` | `n` days (30 when bare)       |
//! | `>= 120`        | lifetime                      |
//! | anything else   | months, folded into whole years at 12+ |
//!
//! [`PlanTerm::decode`] is the only place that looks at the code's digits.
//! Everything else works on the decoded [`PlanTerm`].

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::products::{DurationCode, RawPlan};

/// `duration_value` reported for lifetime plans. Not a real count.
pub const LIFETIME_SENTINEL: i64 = 9999;

const LIFETIME_CODE: &str = "20010";
const YEARLY_PREFIX: &str = "200";
const DAILY_PREFIX: &str = "100";
const LIFETIME_THRESHOLD_MONTHS: i64 = 120;
const DEFAULT_YEARS: i64 = 1;
const DEFAULT_DAYS: i64 = 30;
const DEFAULT_MONTHS: i64 = 1;

/// A decoded plan duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlanTerm {
    Lifetime,
    Yearly { years: i64 },
    Daily { days: i64 },
    Monthly { months: i64 },
}

impl PlanTerm {
    /// Decodes a raw `duration_months` code. First matching rule wins.
    #[must_use]
    pub fn decode(code: Option<&DurationCode>) -> Self {
        let Some(code) = code else {
            return PlanTerm::Monthly {
                months: DEFAULT_MONTHS,
            };
        };

        let text = code.to_string();
        let text = text.trim();

        if text == LIFETIME_CODE || text == "0" {
            return PlanTerm::Lifetime;
        }

        // A bare "200" is left to the lifetime threshold below.
        if let Some(suffix) = text.strip_prefix(YEARLY_PREFIX).filter(|s| !s.is_empty()) {
            return PlanTerm::Yearly {
                years: positive_or(parse_leading_int(suffix), DEFAULT_YEARS),
            };
        }

        // A bare "100" is 30 days, not 100 months.
        if let Some(suffix) = text.strip_prefix(DAILY_PREFIX) {
            return PlanTerm::Daily {
                days: positive_or(parse_leading_int(suffix), DEFAULT_DAYS),
            };
        }

        let parsed = parse_leading_int(text);
        if parsed.is_some_and(|n| n >= LIFETIME_THRESHOLD_MONTHS) {
            return PlanTerm::Lifetime;
        }

        let months = positive_or(parsed, DEFAULT_MONTHS);
        if months >= 12 {
            PlanTerm::Yearly { years: months / 12 }
        } else {
            PlanTerm::Monthly { months }
        }
    }

    #[must_use]
    pub fn duration_type(self) -> DurationType {
        match self {
            PlanTerm::Lifetime => DurationType::Lifetime,
            PlanTerm::Yearly { .. } => DurationType::Yearly,
            PlanTerm::Daily { .. } => DurationType::Daily,
            PlanTerm::Monthly { .. } => DurationType::Monthly,
        }
    }

    /// The count in the term's own unit, or [`LIFETIME_SENTINEL`].
    #[must_use]
    pub fn value(self) -> i64 {
        match self {
            PlanTerm::Lifetime => LIFETIME_SENTINEL,
            PlanTerm::Yearly { years } => years,
            PlanTerm::Daily { days } => days,
            PlanTerm::Monthly { months } => months,
        }
    }

    #[must_use]
    pub fn is_lifetime(self) -> bool {
        matches!(self, PlanTerm::Lifetime)
    }

    /// Human label, e.g. `"3 years"`, `"1 month"`, `"7 days"`, `"Lifetime"`.
    #[must_use]
    pub fn display(self) -> String {
        match self {
            PlanTerm::Lifetime => "Lifetime".to_owned(),
            PlanTerm::Yearly { years } => format!("{years} {}", pluralize(years, "year")),
            // Day counts are always written in the plural.
            PlanTerm::Daily { days } => format!("{days} days"),
            PlanTerm::Monthly { months } => format!("{months} {}", pluralize(months, "month")),
        }
    }

    #[must_use]
    pub fn decoded(self) -> DecodedDuration {
        DecodedDuration {
            display_duration: self.display(),
            duration_type: self.duration_type(),
            duration_value: self.value(),
            is_lifetime: self.is_lifetime(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationType {
    Daily,
    Monthly,
    Yearly,
    Lifetime,
}

impl DurationType {
    /// Unit word used in per-unit price labels. Lifetime plans have none.
    #[must_use]
    pub fn unit(self) -> Option<&'static str> {
        match self {
            DurationType::Daily => Some("day"),
            DurationType::Monthly => Some("month"),
            DurationType::Yearly => Some("year"),
            DurationType::Lifetime => None,
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationType::Daily => write!(f, "daily"),
            DurationType::Monthly => write!(f, "monthly"),
            DurationType::Yearly => write!(f, "yearly"),
            DurationType::Lifetime => write!(f, "lifetime"),
        }
    }
}

/// Flat view of a [`PlanTerm`] in the shape the storefront renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedDuration {
    pub display_duration: String,
    pub duration_type: DurationType,
    pub duration_value: i64,
    pub is_lifetime: bool,
}

/// A [`RawPlan`] with its duration decoded and display labels attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedPlan {
    pub id: i64,
    pub title: String,
    pub price: Option<Decimal>,
    /// The code exactly as received.
    pub duration_code: Option<DurationCode>,
    pub term: PlanTerm,
    #[serde(flatten)]
    pub duration: DecodedDuration,
    pub description: String,
    pub unit_price_label: Option<String>,
}

/// Decodes a raw duration code into its display tuple.
#[must_use]
pub fn decode_duration(code: Option<&DurationCode>) -> DecodedDuration {
    PlanTerm::decode(code).decoded()
}

/// Per-unit price label, e.g. `"≈ PKR 400.00 / month"`.
///
/// Lifetime plans get `"one-time payment"`. A missing price counts as zero.
/// Returns `None` when `duration_value` is not positive, since there is no
/// meaningful rate to show.
#[must_use]
pub fn unit_price_label(
    price: Option<Decimal>,
    duration: &DecodedDuration,
    currency: &str,
) -> Option<String> {
    if duration.is_lifetime {
        return Some("one-time payment".to_owned());
    }

    let unit = duration.duration_type.unit()?;
    if duration.duration_value <= 0 {
        return None;
    }

    let price = price.unwrap_or(Decimal::ZERO);
    let mut rate = (price / Decimal::from(duration.duration_value))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(2);

    Some(format!("≈ {currency} {rate} / {unit}"))
}

/// One-line pitch shown under a plan option.
#[must_use]
pub fn plan_description(term: PlanTerm) -> String {
    match term {
        PlanTerm::Daily { days } => format!("Pay for {days} days of access"),
        PlanTerm::Yearly { years } => {
            format!("Best value - {years} {} access", pluralize(years, "year"))
        }
        PlanTerm::Lifetime => "One-time payment, lifetime access".to_owned(),
        PlanTerm::Monthly { months } => format!("{months} {} access", pluralize(months, "month")),
    }
}

/// Decodes a plan and attaches its labels.
#[must_use]
pub fn normalize_plan(plan: RawPlan, currency: &str) -> NormalizedPlan {
    let term = PlanTerm::decode(plan.duration_months.as_ref());
    let duration = term.decoded();
    let unit_price_label = unit_price_label(plan.price, &duration, currency);

    NormalizedPlan {
        id: plan.id,
        title: plan.title,
        price: plan.price,
        duration_code: plan.duration_months,
        term,
        duration,
        description: plan_description(term),
        unit_price_label,
    }
}

fn pluralize(value: i64, word: &str) -> String {
    if value > 1 {
        format!("{word}s")
    } else {
        word.to_owned()
    }
}

fn positive_or(value: Option<i64>, default: i64) -> i64 {
    value.filter(|n| *n > 0).unwrap_or(default)
}

/// Parses the leading integer of `s`: optional whitespace, an optional sign,
/// then digits up to the first non-digit. `"12abc"` gives 12, `"abc"` gives
/// `None`. Digit runs too long for `i64` saturate.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[path = "plans_test.rs"]
mod tests;
