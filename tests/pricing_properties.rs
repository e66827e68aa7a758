use proptest::prelude::*;
use rust_decimal::Decimal;
use tokenplan::billing::{
    compute_costs, compute_discount, convert_to_monthly_tokens, quote_all, quote_plan, recommend,
    BillingOptions, Cadence, Catalog, DiscountMode, PaymentOption, Strategy as PlanStrategy, Term,
    UsageRequest,
};

fn usage_from(catalog: &Catalog, counts: &[u64], cadence: Cadence) -> UsageRequest {
    catalog
        .services
        .iter()
        .zip(counts)
        .fold(UsageRequest::new(cadence), |usage, (service, count)| {
            usage.with(&service.name, *count)
        })
}

fn raw_tokens(catalog: &Catalog, counts: &[u64]) -> u64 {
    catalog
        .services
        .iter()
        .zip(counts)
        .map(|(service, count)| service.unit_token_cost * count)
        .sum()
}

fn term_strategy() -> impl Strategy<Value = Term> {
    prop_oneof![Just(Term::OneYear), Just(Term::TwoYears), Just(Term::ThreeYears)]
}

fn payment_strategy() -> impl Strategy<Value = PaymentOption> {
    prop_oneof![Just(PaymentOption::Monthly), Just(PaymentOption::Upfront)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_conversion_monotone_per_service(
        counts in prop::collection::vec(0u64..100_000, 9),
        index in 0usize..9,
        extra in 0u64..10_000,
        annual in any::<bool>(),
    ) {
        let catalog = Catalog::builtin();
        let cadence = if annual { Cadence::Annual } else { Cadence::Monthly };

        let before = convert_to_monthly_tokens(&catalog.services, &usage_from(&catalog, &counts, cadence));
        let mut bumped = counts.clone();
        bumped[index] += extra;
        let after = convert_to_monthly_tokens(&catalog.services, &usage_from(&catalog, &bumped, cadence));

        prop_assert!(after >= before);
    }

    #[test]
    fn test_monthly_conversion_is_exact_sum(
        counts in prop::collection::vec(0u64..100_000, 9),
    ) {
        let catalog = Catalog::builtin();
        let tokens = convert_to_monthly_tokens(
            &catalog.services,
            &usage_from(&catalog, &counts, Cadence::Monthly),
        );
        prop_assert_eq!(tokens, raw_tokens(&catalog, &counts));
    }

    #[test]
    fn test_annual_conversion_rounds_up_by_less_than_one(
        counts in prop::collection::vec(0u64..1_000_000, 9),
    ) {
        let catalog = Catalog::builtin();
        let monthly = convert_to_monthly_tokens(
            &catalog.services,
            &usage_from(&catalog, &counts, Cadence::Annual),
        );
        let exact = Decimal::from(raw_tokens(&catalog, &counts)) / Decimal::from(12);
        let monthly = Decimal::from(monthly);

        prop_assert!(monthly >= exact);
        prop_assert!(monthly - exact < Decimal::ONE);
    }

    #[test]
    fn test_nearest_plan_covers_or_is_largest(tokens in 0u64..2_000_000) {
        let catalog = Catalog::builtin();
        let plan = recommend(&catalog.plans, tokens, PlanStrategy::NearestPlan);

        if tokens > catalog.plans.largest().included_tokens {
            prop_assert_eq!(plan, catalog.plans.largest());
        } else {
            prop_assert!(plan.included_tokens >= tokens);
            // and it is the smallest such tier
            for smaller in catalog.plans.iter().take_while(|t| t.name != plan.name) {
                prop_assert!(smaller.included_tokens < tokens);
            }
        }
    }

    #[test]
    fn test_cost_optimized_never_worse_than_nearest(tokens in 0u64..2_000_000) {
        let catalog = Catalog::builtin();
        let optimized = recommend(&catalog.plans, tokens, PlanStrategy::CostOptimized);
        let nearest = recommend(&catalog.plans, tokens, PlanStrategy::NearestPlan);

        let optimized_cost = quote_plan(optimized, tokens).monthly_cost;
        let nearest_cost = quote_plan(nearest, tokens).monthly_cost;
        prop_assert!(optimized_cost <= nearest_cost);
    }

    #[test]
    fn test_cost_optimized_is_not_the_most_expensive(tokens in 0u64..2_000_000) {
        let catalog = Catalog::builtin();
        let chosen = recommend(&catalog.plans, tokens, PlanStrategy::CostOptimized);
        let chosen_cost = quote_plan(chosen, tokens).monthly_cost;

        let others: Vec<Decimal> = quote_all(&catalog.plans, tokens)
            .into_iter()
            .filter(|q| q.plan.name != chosen.name)
            .map(|q| q.monthly_cost)
            .collect();
        prop_assert!(others.iter().any(|cost| *cost >= chosen_cost));
    }

    #[test]
    fn test_compute_costs_is_pure(
        tokens in 0u64..2_000_000,
        term in term_strategy(),
        payment in payment_strategy(),
    ) {
        let catalog = Catalog::builtin();
        let plan = recommend(&catalog.plans, tokens, PlanStrategy::NearestPlan);
        let options = BillingOptions { payment, term, ..Default::default() };

        let first = compute_costs(tokens, plan, &options);
        let second = compute_costs(tokens, plan, &options);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_breakdown_arithmetic(
        tokens in 0u64..2_000_000,
        term in term_strategy(),
        payment in payment_strategy(),
        multiplicative in any::<bool>(),
    ) {
        let catalog = Catalog::builtin();
        let plan = recommend(&catalog.plans, tokens, PlanStrategy::CostOptimized);
        let discount_mode = if multiplicative { DiscountMode::Multiplicative } else { DiscountMode::Additive };
        let options = BillingOptions { payment, term, strategy: PlanStrategy::CostOptimized, discount_mode };
        let b = compute_costs(tokens, plan, &options);

        prop_assert_eq!(b.overage_tokens, tokens.saturating_sub(plan.included_tokens));
        prop_assert_eq!(
            b.monthly_cost_including_overage,
            b.standard_monthly_cost + b.overage_cost
        );
        prop_assert_eq!(
            b.term_cost,
            b.monthly_cost_including_overage * Decimal::from(12 * term.years())
        );
        prop_assert!(b.total_discount_pct >= Decimal::ZERO);
        prop_assert!(b.total_discount_pct <= Decimal::ONE_HUNDRED);
        prop_assert!(b.final_cost_after_discount <= b.term_cost);

        match &b.yearly_costs {
            Some(years) => {
                prop_assert!(term.years() > 1);
                prop_assert_eq!(years.len(), term.years() as usize);
                prop_assert!(years.windows(2).all(|w| w[0] == w[1]));
                prop_assert_eq!(years.iter().sum::<Decimal>(), b.final_cost_after_discount);
            }
            None => {
                prop_assert_eq!(term, Term::OneYear);
            }
        }
    }
}

#[test]
fn test_additive_discount_set() {
    let allowed = [0, 10, 20, 30].map(Decimal::from);
    for term in Term::ALL {
        for payment in [PaymentOption::Monthly, PaymentOption::Upfront] {
            let discount = compute_discount(term, payment, DiscountMode::Additive);
            assert!(allowed.contains(&discount.total_discount_pct));
            assert_eq!(
                discount.total_discount_pct,
                discount.term_discount_pct + discount.upfront_discount_pct
            );
        }
    }
}
