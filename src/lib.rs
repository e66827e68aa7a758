//! Subscription plan recommender and cost calculator.
//!
//! Usage counts per service are converted into monthly tokens, a plan is
//! picked from an ordered price list, and the bill is computed for the chosen
//! payment option, term and discount mode. Catalogs are plain values passed
//! into every call; nothing in the pricing path keeps state.
//!
//! ```
//! use tokenplan::billing::{
//!     compute_recommendation_and_cost, BillingOptions, Cadence, Catalog, UsageRequest,
//! };
//!
//! let catalog = Catalog::builtin();
//! let usage = UsageRequest::new(Cadence::Monthly).with("Contracts", 100);
//! let breakdown = compute_recommendation_and_cost(&catalog, &usage, &BillingOptions::default());
//!
//! assert_eq!(breakdown.total_tokens, 700);
//! assert_eq!(breakdown.recommended_plan_name, "Starter");
//! ```

pub mod billing;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod utils;
