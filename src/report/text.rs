use rust_decimal::Decimal;

use super::{CatalogView, Report, ReportRenderer};
use crate::billing::Catalog;
use crate::error::Result;

pub struct TextRenderer;

/// Dollar amount rounded to cents
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Per-token rate with four decimals
pub fn format_rate(rate: Decimal) -> String {
    format!("${:.4}", rate.round_dp(4))
}

pub fn format_pct(pct: Decimal) -> String {
    format!("{}%", pct.normalize())
}

/// Label and value with values aligned in one column
fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<31}{}", format!("{}:", label), value)
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let b = &report.breakdown;

        let mut lines = vec![
            "Recommended Plan and Cost Breakdown".to_string(),
            row("Recommended Plan", &b.recommended_plan_name),
            row("Strategy", b.strategy),
            row("Tokens Needed Monthly", b.total_tokens),
            row("Tokens Included Monthly", b.included_tokens),
            row("Overage Tokens Monthly", b.overage_tokens),
            row("Overage Rate per Token", format_rate(b.overage_rate_per_token)),
            row("Overage Monthly Cost", format_money(b.overage_cost)),
            row("Plan Monthly Price", format_money(b.standard_monthly_cost)),
            row("Total Monthly Cost", format_money(b.monthly_cost_including_overage)),
            row("Annual Cost (Monthly Billing)", format_money(b.annual_cost)),
            row(&format!("Term Cost ({})", b.term), format_money(b.term_cost)),
            row(
                "Discount",
                format!(
                    "{} term + {} upfront = {} ({})",
                    format_pct(b.term_discount_pct),
                    format_pct(b.upfront_discount_pct),
                    format_pct(b.total_discount_pct),
                    b.discount_mode
                ),
            ),
            row(
                &format!("Final Cost ({})", b.payment),
                format_money(b.final_cost_after_discount),
            ),
        ];
        if !b.savings.is_zero() {
            lines.push(row("You Save", format_money(b.savings)));
        }

        if let Some(years) = &b.yearly_costs {
            lines.push(String::new());
            lines.push("Per-Year Cost".to_string());
            lines.extend(
                years
                    .iter()
                    .enumerate()
                    .map(|(i, cost)| format!("  Year {}: {}", i + 1, format_money(*cost))),
            );
        }

        if !report.ignored_services.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "Ignored unknown services: {}",
                report.ignored_services.join("; ")
            ));
        }

        if let Some(quotes) = &report.comparison {
            lines.push(String::new());
            lines.push(format!("All Plans at {} Tokens/Month", b.total_tokens));
            lines.push(format!(
                "  {:<14} {:>12} {:>14} {:>14}",
                "Plan", "Price", "Overage", "Monthly"
            ));
            for quote in quotes {
                let marker = if quote.plan.name == b.recommended_plan_name {
                    " *"
                } else {
                    ""
                };
                lines.push(format!(
                    "  {:<14} {:>12} {:>14} {:>14}{}",
                    quote.plan.name,
                    format_money(quote.plan.monthly_price),
                    format_money(quote.overage_cost),
                    format_money(quote.monthly_cost),
                    marker
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    fn render_catalog(&self, catalog: &Catalog, what: CatalogView) -> Result<String> {
        let lines: Vec<String> = match what {
            CatalogView::Services => std::iter::once(format!(
                "{:<28} {:>12}",
                "Service", "Tokens/Unit"
            ))
            .chain(
                catalog
                    .services
                    .iter()
                    .map(|entry| format!("{:<28} {:>12}", entry.name, entry.unit_token_cost)),
            )
            .collect(),
            CatalogView::Plans => std::iter::once(format!(
                "{:<14} {:>12} {:>16} {:>12}",
                "Plan", "Price", "Tokens Included", "Overage"
            ))
            .chain(catalog.plans.iter().map(|tier| {
                format!(
                    "{:<14} {:>12} {:>16} {:>12}",
                    tier.name,
                    format_money(tier.monthly_price),
                    tier.included_tokens,
                    format_rate(tier.overage_rate_per_token)
                )
            }))
            .collect(),
        };
        Ok(lines.join("\n"))
    }
}
