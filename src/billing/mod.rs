pub mod calculator;
pub mod discount;
pub mod pricing;
pub mod recommend;
pub mod request;
pub mod tokens;
pub mod types;

pub use calculator::{compute_costs, compute_recommendation_and_cost};
pub use discount::compute_discount;
pub use pricing::{Catalog, PlanCatalog, ServiceCatalog};
pub use recommend::{quote_all, quote_plan, recommend};
pub use request::{QuoteDefaults, QuoteRequest};
pub use tokens::{convert_to_monthly_tokens, unknown_services};
pub use types::{
    BillingOptions, Cadence, CostBreakdown, DiscountBreakdown, DiscountMode, PaymentOption,
    PlanQuote, PlanTier, ServiceEntry, Strategy, Term, UsageRequest,
};
