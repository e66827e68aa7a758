use super::{CatalogView, Report, ReportRenderer};
use crate::billing::Catalog;
use crate::error::Result;

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn render_catalog(&self, catalog: &Catalog, what: CatalogView) -> Result<String> {
        let content = match what {
            CatalogView::Services => serde_json::to_string_pretty(catalog.services.entries())?,
            CatalogView::Plans => serde_json::to_string_pretty(catalog.plans.tiers())?,
        };
        Ok(content)
    }
}
