use rust_decimal::Decimal;

use super::pricing::PlanCatalog;
use super::{PlanQuote, PlanTier, Strategy};
use crate::debug_println;

/// Price a single tier against a monthly token total
pub fn quote_plan(plan: &PlanTier, tokens: u64) -> PlanQuote {
    let overage_tokens = plan.overage_tokens(tokens);
    let overage_cost = Decimal::from(overage_tokens) * plan.overage_rate_per_token;

    PlanQuote {
        plan: plan.clone(),
        overage_tokens,
        overage_cost,
        monthly_cost: plan.monthly_price + overage_cost,
    }
}

/// Price every tier, in catalog order
pub fn quote_all(plans: &PlanCatalog, tokens: u64) -> Vec<PlanQuote> {
    plans.iter().map(|plan| quote_plan(plan, tokens)).collect()
}

/// Select a plan for `tokens` according to `strategy`
pub fn recommend(plans: &PlanCatalog, tokens: u64, strategy: Strategy) -> &PlanTier {
    let plan = match strategy {
        Strategy::NearestPlan => nearest_plan(plans, tokens),
        Strategy::CostOptimized => cost_optimized_plan(plans, tokens),
    };
    debug_println!(
        "recommend: strategy={} tokens={} plan={}",
        strategy,
        tokens,
        plan.name
    );
    plan
}

/// First tier whose allowance covers the usage, else the largest tier
fn nearest_plan(plans: &PlanCatalog, tokens: u64) -> &PlanTier {
    plans
        .iter()
        .find(|plan| plan.covers(tokens))
        .unwrap_or_else(|| plans.largest())
}

/// Cheapest candidate by monthly cost, scanning tiers in order.
///
/// When the next tier's flat price undercuts the current tier's cost with
/// overage, the next tier stands in as the candidate for that step. Ties keep
/// the earlier candidate.
fn cost_optimized_plan(plans: &PlanCatalog, tokens: u64) -> &PlanTier {
    let tiers = plans.tiers();
    let mut best: Option<(&PlanTier, Decimal)> = None;

    for (i, tier) in tiers.iter().enumerate() {
        let cost = quote_plan(tier, tokens).monthly_cost;

        let candidate = match tiers.get(i + 1) {
            Some(next) if next.monthly_price < cost => {
                (next, quote_plan(next, tokens).monthly_cost)
            }
            _ => (tier, cost),
        };

        debug_println!(
            "recommend: {} costs {} -> candidate {} at {}",
            tier.name,
            cost,
            candidate.0.name,
            candidate.1
        );

        match best {
            Some((_, best_cost)) if candidate.1 >= best_cost => {}
            _ => best = Some(candidate),
        }
    }

    best.map(|(plan, _)| plan).unwrap_or_else(|| plans.largest())
}
