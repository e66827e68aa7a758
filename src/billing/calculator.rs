use rust_decimal::Decimal;

use super::discount::compute_discount;
use super::pricing::Catalog;
use super::recommend::{quote_plan, recommend};
use super::tokens::convert_to_monthly_tokens;
use super::{BillingOptions, CostBreakdown, PlanTier, UsageRequest};
use crate::debug_println;

const MONTHS_PER_YEAR: u32 = 12;

/// Compute the bill for `tokens` on `plan` under the given billing options
pub fn compute_costs(tokens: u64, plan: &PlanTier, options: &BillingOptions) -> CostBreakdown {
    let quote = quote_plan(plan, tokens);
    let discount = compute_discount(options.term, options.payment, options.discount_mode);
    let factor = discount.factor();

    let annual_cost = quote.monthly_cost * Decimal::from(MONTHS_PER_YEAR);
    let term_cost = annual_cost * Decimal::from(options.term.years());
    let final_cost = term_cost * factor;

    // Same discounted figure for every year of the term
    let yearly_costs = (options.term.years() > 1)
        .then(|| vec![annual_cost * factor; options.term.years() as usize]);

    debug_println!(
        "costs: plan={} monthly={} term={} discount={}% final={}",
        plan.name,
        quote.monthly_cost,
        term_cost,
        discount.total_discount_pct,
        final_cost
    );

    CostBreakdown {
        total_tokens: tokens,
        recommended_plan_name: plan.name.clone(),
        included_tokens: plan.included_tokens,
        overage_tokens: quote.overage_tokens,
        overage_rate_per_token: plan.overage_rate_per_token,
        overage_cost: quote.overage_cost,
        standard_monthly_cost: plan.monthly_price,
        monthly_cost_including_overage: quote.monthly_cost,
        annual_cost,
        term_cost,
        term_discount_pct: discount.term_discount_pct,
        upfront_discount_pct: discount.upfront_discount_pct,
        total_discount_pct: discount.total_discount_pct,
        final_cost_after_discount: final_cost,
        savings: term_cost - final_cost,
        yearly_costs,
        payment: options.payment,
        term: options.term,
        strategy: options.strategy,
        discount_mode: options.discount_mode,
    }
}

/// Full pipeline: usage -> tokens -> recommended plan -> cost breakdown
pub fn compute_recommendation_and_cost(
    catalog: &Catalog,
    usage: &UsageRequest,
    options: &BillingOptions,
) -> CostBreakdown {
    let tokens = convert_to_monthly_tokens(&catalog.services, usage);
    let plan = recommend(&catalog.plans, tokens, options.strategy);
    compute_costs(tokens, plan, options)
}
