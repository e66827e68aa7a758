use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One billable service and its token cost per unit (page or photo)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub unit_token_cost: u64,
}

impl ServiceEntry {
    pub fn new(name: &str, unit_token_cost: u64) -> Self {
        Self {
            name: name.to_string(),
            unit_token_cost,
        }
    }
}

/// Subscription tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTier {
    pub name: String,
    pub monthly_price: Decimal,
    pub included_tokens: u64,
    pub overage_rate_per_token: Decimal,
}

impl PlanTier {
    pub fn new(
        name: &str,
        monthly_price: Decimal,
        included_tokens: u64,
        overage_rate_per_token: Decimal,
    ) -> Self {
        Self {
            name: name.to_string(),
            monthly_price,
            included_tokens,
            overage_rate_per_token,
        }
    }

    /// Tokens beyond the included allowance, floored at zero
    pub fn overage_tokens(&self, tokens: u64) -> u64 {
        tokens.saturating_sub(self.included_tokens)
    }

    /// Whether the allowance covers `tokens` without overage
    pub fn covers(&self, tokens: u64) -> bool {
        tokens <= self.included_tokens
    }
}

/// Whether usage counts are per month or per year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[default]
    Monthly,
    Annual,
}

/// When the customer pays for the term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
    #[default]
    Monthly,
    Upfront,
}

/// Contract length in years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Term {
    #[default]
    OneYear,
    TwoYears,
    ThreeYears,
}

/// Plan selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Smallest tier whose allowance covers the usage
    #[default]
    NearestPlan,
    /// Tier with the lowest monthly cost including overage
    CostOptimized,
}

/// How term and upfront discounts are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMode {
    /// Percentages are summed: 20% + 10% = 30%
    #[default]
    Additive,
    /// Factors are multiplied: 0.80 × 0.90 = 0.72, i.e. 28%
    Multiplicative,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::OneYear, Term::TwoYears, Term::ThreeYears];

    pub fn years(self) -> u32 {
        match self {
            Term::OneYear => 1,
            Term::TwoYears => 2,
            Term::ThreeYears => 3,
        }
    }
}

impl TryFrom<u8> for Term {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Term::OneYear),
            2 => Ok(Term::TwoYears),
            3 => Ok(Term::ThreeYears),
            other => Err(Error::invalid_option("term", other.to_string(), "1, 2, 3")),
        }
    }
}

impl TryFrom<i64> for Term {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| Error::invalid_option("term", value.to_string(), "1, 2, 3"))
            .and_then(Term::try_from)
    }
}

impl From<Term> for u8 {
    fn from(term: Term) -> Self {
        term.years() as u8
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect()
}

impl FromStr for Cadence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "monthly" | "month" => Ok(Cadence::Monthly),
            "annual" | "annually" | "yearly" | "year" => Ok(Cadence::Annual),
            _ => Err(Error::invalid_option("cadence", s, "monthly, annual")),
        }
    }
}

impl FromStr for PaymentOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "monthly" | "monthlybilling" => Ok(PaymentOption::Monthly),
            "upfront" | "upfrontpayment" => Ok(PaymentOption::Upfront),
            _ => Err(Error::invalid_option("payment option", s, "monthly, upfront")),
        }
    }
}

impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| Error::invalid_option("term", s, "1, 2, 3"))
            .and_then(Term::try_from)
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "nearest" | "nearestplan" => Ok(Strategy::NearestPlan),
            "cost" | "costoptimized" | "cheapest" => Ok(Strategy::CostOptimized),
            _ => Err(Error::invalid_option(
                "strategy",
                s,
                "nearest-plan, cost-optimized",
            )),
        }
    }
}

impl FromStr for DiscountMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "additive" | "add" | "sum" => Ok(DiscountMode::Additive),
            "multiplicative" | "multiply" | "compound" => Ok(DiscountMode::Multiplicative),
            _ => Err(Error::invalid_option(
                "discount mode",
                s,
                "additive, multiplicative",
            )),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Monthly => write!(f, "monthly"),
            Cadence::Annual => write!(f, "annual"),
        }
    }
}

impl fmt::Display for PaymentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentOption::Monthly => write!(f, "Monthly Billing"),
            PaymentOption::Upfront => write!(f, "Upfront Payment"),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.years() {
            1 => write!(f, "1 year"),
            n => write!(f, "{} years", n),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::NearestPlan => write!(f, "nearest-plan"),
            Strategy::CostOptimized => write!(f, "cost-optimized"),
        }
    }
}

impl fmt::Display for DiscountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountMode::Additive => write!(f, "additive"),
            DiscountMode::Multiplicative => write!(f, "multiplicative"),
        }
    }
}

/// Raw usage counts keyed by service name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRequest {
    pub counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub cadence: Cadence,
}

impl UsageRequest {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            counts: BTreeMap::new(),
            cadence,
        }
    }

    /// Builder-style insert; repeated services accumulate
    pub fn with(mut self, service: &str, count: u64) -> Self {
        self.add(service, count);
        self
    }

    pub fn add(&mut self, service: &str, count: u64) {
        let slot = self.counts.entry(service.to_string()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Billing choices that shape the final cost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingOptions {
    pub payment: PaymentOption,
    pub term: Term,
    pub strategy: Strategy,
    #[serde(default)]
    pub discount_mode: DiscountMode,
}

/// Term, upfront and combined discount percentages (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountBreakdown {
    pub term_discount_pct: Decimal,
    pub upfront_discount_pct: Decimal,
    pub total_discount_pct: Decimal,
}

impl DiscountBreakdown {
    /// Multiplier applied to undiscounted cost: 1 - total/100
    pub fn factor(&self) -> Decimal {
        Decimal::ONE - self.total_discount_pct / Decimal::ONE_HUNDRED
    }
}

/// A single tier priced against a token total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanQuote {
    pub plan: PlanTier,
    pub overage_tokens: u64,
    pub overage_cost: Decimal,
    pub monthly_cost: Decimal,
}

/// Result of one quote computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub total_tokens: u64,
    pub recommended_plan_name: String,
    pub included_tokens: u64,
    pub overage_tokens: u64,
    pub overage_rate_per_token: Decimal,
    pub overage_cost: Decimal,
    pub standard_monthly_cost: Decimal,
    pub monthly_cost_including_overage: Decimal,
    /// Twelve months at monthly billing, before any discount
    pub annual_cost: Decimal,
    pub term_cost: Decimal,
    pub term_discount_pct: Decimal,
    pub upfront_discount_pct: Decimal,
    pub total_discount_pct: Decimal,
    pub final_cost_after_discount: Decimal,
    pub savings: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_costs: Option<Vec<Decimal>>,
    pub payment: PaymentOption,
    pub term: Term,
    pub strategy: Strategy,
    pub discount_mode: DiscountMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_term_from_integer() {
        assert_eq!(Term::try_from(1u8).unwrap(), Term::OneYear);
        assert_eq!(Term::try_from(3u8).unwrap(), Term::ThreeYears);
        assert!(matches!(
            Term::try_from(4u8),
            Err(Error::InvalidOption { option: "term", .. })
        ));
        assert!(Term::try_from(-1i64).is_err());
        assert!(Term::try_from(0i64).is_err());
    }

    #[test]
    fn test_option_parsing_accepts_display_labels() {
        assert_eq!(
            "Upfront Payment".parse::<PaymentOption>().unwrap(),
            PaymentOption::Upfront
        );
        assert_eq!(
            "Monthly Billing".parse::<PaymentOption>().unwrap(),
            PaymentOption::Monthly
        );
        assert_eq!(
            "cost_optimized".parse::<Strategy>().unwrap(),
            Strategy::CostOptimized
        );
        assert_eq!("NearestPlan".parse::<Strategy>().unwrap(), Strategy::NearestPlan);
        assert_eq!("Annual".parse::<Cadence>().unwrap(), Cadence::Annual);
        assert_eq!(
            "multiplicative".parse::<DiscountMode>().unwrap(),
            DiscountMode::Multiplicative
        );
    }

    #[test]
    fn test_option_parsing_rejects_unknown_values() {
        let err = "weekly".parse::<Cadence>().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option: "cadence", .. }));

        let err = "later".parse::<PaymentOption>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOption {
                option: "payment option",
                ..
            }
        ));

        let err = "two".parse::<Term>().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option: "term", .. }));

        let err = "random".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option: "strategy", .. }));
    }

    #[test]
    fn test_term_serializes_as_integer() {
        let options = BillingOptions {
            term: Term::TwoYears,
            ..Default::default()
        };
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["term"], 2);
        assert_eq!(json["strategy"], "nearest-plan");

        let bad: Result<BillingOptions, _> = serde_json::from_str(
            r#"{"payment":"monthly","term":7,"strategy":"nearest-plan"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_usage_request_accumulates() {
        let usage = UsageRequest::new(Cadence::Monthly)
            .with("Contracts", 10)
            .with("Contracts", 5);
        assert_eq!(usage.counts["Contracts"], 15);
    }

    #[test]
    fn test_plan_tier_overage() {
        let tier = PlanTier::new("Starter", dec!(99), 2000, dec!(0.0590));
        assert_eq!(tier.overage_tokens(1500), 0);
        assert_eq!(tier.overage_tokens(2500), 500);
        assert!(tier.covers(2000));
        assert!(!tier.covers(2001));
    }

    #[test]
    fn test_discount_factor() {
        let discount = DiscountBreakdown {
            term_discount_pct: dec!(20),
            upfront_discount_pct: dec!(10),
            total_discount_pct: dec!(30),
        };
        assert_eq!(discount.factor(), dec!(0.70));
    }
}
