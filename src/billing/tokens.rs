use super::pricing::ServiceCatalog;
use super::{Cadence, UsageRequest};
use crate::debug_println;

const MONTHS_PER_YEAR: u64 = 12;

/// Convert raw usage into a monthly token total.
///
/// Services missing from the catalog are filtered out. Annual counts are
/// normalised to a monthly rate and the total is rounded up, so a plan is
/// never sized below the real fractional usage.
pub fn convert_to_monthly_tokens(services: &ServiceCatalog, usage: &UsageRequest) -> u64 {
    let raw: u64 = usage
        .counts
        .iter()
        .filter_map(|(name, count)| {
            services
                .unit_cost(name)
                .map(|unit_cost| count.saturating_mul(unit_cost))
        })
        .fold(0u64, |acc, tokens| acc.saturating_add(tokens));

    let tokens = match usage.cadence {
        Cadence::Monthly => raw,
        // ceil(sum(count / 12 * cost)) == ceil(sum(count * cost) / 12)
        Cadence::Annual => raw.div_ceil(MONTHS_PER_YEAR),
    };

    let skipped = unknown_services(services, usage);
    if !skipped.is_empty() {
        debug_println!("tokens: ignoring unknown services {:?}", skipped);
    }
    debug_println!(
        "tokens: cadence={} raw={} monthly={}",
        usage.cadence,
        raw,
        tokens
    );

    tokens
}

/// Usage keys that are not in the catalog and therefore add no tokens
pub fn unknown_services<'a>(services: &ServiceCatalog, usage: &'a UsageRequest) -> Vec<&'a str> {
    usage
        .counts
        .keys()
        .filter(|name| !services.contains(name))
        .map(String::as_str)
        .collect()
}
