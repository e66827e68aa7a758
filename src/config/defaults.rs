use super::types::Config;
use crate::billing::{Cadence, DiscountMode, PaymentOption, QuoteDefaults, Strategy, Term};

pub const DEFAULT_CONFIG: Config = Config {
    defaults: QuoteDefaults {
        cadence: Cadence::Monthly,
        payment: PaymentOption::Monthly,
        term: Term::OneYear,
        strategy: Strategy::NearestPlan,
        discount_mode: DiscountMode::Additive,
    },
    services: None,
    plans: None,
};

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
