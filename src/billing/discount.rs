use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{DiscountBreakdown, DiscountMode, PaymentOption, Term};

/// Discount earned by committing to a longer term
pub fn term_discount_pct(term: Term) -> Decimal {
    match term {
        Term::OneYear => Decimal::ZERO,
        Term::TwoYears => dec!(10),
        Term::ThreeYears => dec!(20),
    }
}

/// Extra discount for paying the whole term at signing
pub fn upfront_discount_pct(payment: PaymentOption) -> Decimal {
    match payment {
        PaymentOption::Monthly => Decimal::ZERO,
        PaymentOption::Upfront => dec!(10),
    }
}

/// Term, upfront and combined discount for one request
pub fn compute_discount(term: Term, payment: PaymentOption, mode: DiscountMode) -> DiscountBreakdown {
    let term_pct = term_discount_pct(term);
    let upfront_pct = upfront_discount_pct(payment);

    let total_pct = match mode {
        DiscountMode::Additive => term_pct + upfront_pct,
        DiscountMode::Multiplicative => {
            let remaining = (Decimal::ONE_HUNDRED - term_pct) * (Decimal::ONE_HUNDRED - upfront_pct)
                / Decimal::ONE_HUNDRED;
            Decimal::ONE_HUNDRED - remaining
        }
    };

    DiscountBreakdown {
        term_discount_pct: term_pct,
        upfront_discount_pct: upfront_pct,
        total_discount_pct: total_pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_discounts() {
        assert_eq!(term_discount_pct(Term::OneYear), dec!(0));
        assert_eq!(term_discount_pct(Term::TwoYears), dec!(10));
        assert_eq!(term_discount_pct(Term::ThreeYears), dec!(20));
    }

    #[test]
    fn test_additive_combinations() {
        let expected = [
            (Term::OneYear, PaymentOption::Monthly, dec!(0)),
            (Term::TwoYears, PaymentOption::Monthly, dec!(10)),
            (Term::ThreeYears, PaymentOption::Monthly, dec!(20)),
            (Term::OneYear, PaymentOption::Upfront, dec!(10)),
            (Term::TwoYears, PaymentOption::Upfront, dec!(20)),
            (Term::ThreeYears, PaymentOption::Upfront, dec!(30)),
        ];

        for (term, payment, total) in expected {
            let discount = compute_discount(term, payment, DiscountMode::Additive);
            assert_eq!(discount.total_discount_pct, total, "{:?} {:?}", term, payment);
        }
    }

    #[test]
    fn test_three_year_upfront() {
        let discount = compute_discount(Term::ThreeYears, PaymentOption::Upfront, DiscountMode::Additive);
        assert_eq!(discount.term_discount_pct, dec!(20));
        assert_eq!(discount.upfront_discount_pct, dec!(10));
        assert_eq!(discount.total_discount_pct, dec!(30));
        assert_eq!(discount.factor(), dec!(0.7));
    }

    #[test]
    fn test_multiplicative_compounds() {
        let discount = compute_discount(
            Term::ThreeYears,
            PaymentOption::Upfront,
            DiscountMode::Multiplicative,
        );
        // 0.80 * 0.90 = 0.72
        assert_eq!(discount.total_discount_pct, dec!(28));
        assert_eq!(discount.factor(), dec!(0.72));

        let discount = compute_discount(
            Term::TwoYears,
            PaymentOption::Upfront,
            DiscountMode::Multiplicative,
        );
        assert_eq!(discount.total_discount_pct, dec!(19));
    }

    #[test]
    fn test_modes_agree_without_stacking() {
        for term in Term::ALL {
            let add = compute_discount(term, PaymentOption::Monthly, DiscountMode::Additive);
            let mul = compute_discount(term, PaymentOption::Monthly, DiscountMode::Multiplicative);
            assert_eq!(add.total_discount_pct, mul.total_discount_pct);
        }
    }
}
