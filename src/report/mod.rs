pub mod json;
pub mod text;

use serde::Serialize;

use crate::billing::{
    compute_recommendation_and_cost, quote_all, unknown_services, Catalog, CostBreakdown,
    PlanQuote, QuoteDefaults, QuoteRequest,
};
use crate::error::Result;

/// Everything the front end shows for one quote
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub breakdown: CostBreakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Vec<PlanQuote>>,
}

impl Report {
    /// Resolve a request and run the whole pricing pipeline
    pub fn build(
        catalog: &Catalog,
        defaults: &QuoteDefaults,
        request: &QuoteRequest,
        compare: bool,
    ) -> Result<Self> {
        let (usage, options) = request.resolve(defaults)?;
        let breakdown = compute_recommendation_and_cost(catalog, &usage, &options);

        let ignored_services = unknown_services(&catalog.services, &usage)
            .into_iter()
            .map(str::to_string)
            .collect();
        let comparison = compare.then(|| quote_all(&catalog.plans, breakdown.total_tokens));

        Ok(Self {
            breakdown,
            ignored_services,
            comparison,
        })
    }
}

pub trait ReportRenderer {
    fn render(&self, report: &Report) -> Result<String>;
    fn render_catalog(&self, catalog: &Catalog, what: CatalogView) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogView {
    Services,
    Plans,
}

pub use json::JsonRenderer;
pub use text::TextRenderer;

pub fn renderer(json: bool) -> Box<dyn ReportRenderer> {
    if json {
        Box::new(JsonRenderer)
    } else {
        Box::new(TextRenderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_build_report() {
        let mut request = QuoteRequest::default();
        request.add_usage_arg("Contracts=100").unwrap();
        request.add_usage_arg("Receipts=5").unwrap();

        let report = Report::build(
            &Catalog::builtin(),
            &QuoteDefaults::default(),
            &request,
            true,
        )
        .unwrap();

        assert_eq!(report.breakdown.total_tokens, 700);
        assert_eq!(report.ignored_services, vec!["Receipts"]);
        assert_eq!(report.comparison.map(|c| c.len()), Some(7));
    }

    #[test]
    fn test_build_report_rejects_invalid_option() {
        let request = QuoteRequest {
            cadence: Some("weekly".to_string()),
            ..Default::default()
        };
        let err = Report::build(
            &Catalog::builtin(),
            &QuoteDefaults::default(),
            &request,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option: "cadence", .. }));
    }
}
