use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

use super::{PlanTier, ServiceEntry};
use crate::error::{Error, Result};

/// Ceiling on a configured monthly price
pub const MAX_MONTHLY_PRICE: Decimal = dec!(1000000000);
/// Ceiling on a configured overage rate. With token counts capped at
/// `u64::MAX` this keeps every term cost well inside `Decimal` range.
pub const MAX_OVERAGE_RATE: Decimal = dec!(1000);

/// Closed set of billable services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
}

/// Plan tiers ordered by ascending allowance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    tiers: Vec<PlanTier>,
}

/// Both catalogs, validated once and handed to every pricing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub services: ServiceCatalog,
    pub plans: PlanCatalog,
}

impl ServiceCatalog {
    pub fn new(entries: Vec<ServiceEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(Error::InvalidCatalog("service name is empty".to_string()));
            }
            if entry.unit_token_cost == 0 {
                return Err(Error::InvalidCatalog(format!(
                    "service '{}' has a zero token cost",
                    entry.name
                )));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate service '{}'",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Token cost per unit, `None` for services outside the catalog
    pub fn unit_cost(&self, service: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.name == service)
            .map(|e| e.unit_token_cost)
    }

    pub fn contains(&self, service: &str) -> bool {
        self.unit_cost(service).is_some()
    }

    /// Case-insensitive lookup returning the canonical name
    pub fn canonical_name(&self, service: &str) -> Option<&str> {
        let wanted = service.trim();
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(wanted))
            .map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }
}

impl PlanCatalog {
    pub fn new(tiers: Vec<PlanTier>) -> Result<Self> {
        let Some(first) = tiers.first() else {
            return Err(Error::InvalidCatalog("plan list is empty".to_string()));
        };
        check_tier(first)?;

        let mut seen = HashSet::new();
        seen.insert(first.name.as_str());

        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            check_tier(next)?;

            if !seen.insert(next.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate plan '{}'",
                    next.name
                )));
            }
            if next.included_tokens <= prev.included_tokens {
                return Err(Error::InvalidCatalog(format!(
                    "plan '{}' must include more tokens than '{}' ({} <= {})",
                    next.name, prev.name, next.included_tokens, prev.included_tokens
                )));
            }
            if next.monthly_price < prev.monthly_price {
                return Err(Error::InvalidCatalog(format!(
                    "plan '{}' is cheaper than the smaller plan '{}'",
                    next.name, prev.name
                )));
            }
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[PlanTier] {
        &self.tiers
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanTier> {
        self.tiers.iter()
    }

    /// Highest tier; the catalog is never empty
    pub fn largest(&self) -> &PlanTier {
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn get(&self, name: &str) -> Option<&PlanTier> {
        self.tiers.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

fn check_tier(tier: &PlanTier) -> Result<()> {
    if tier.name.trim().is_empty() {
        return Err(Error::InvalidCatalog("plan name is empty".to_string()));
    }
    if tier.monthly_price < Decimal::ZERO {
        return Err(Error::InvalidCatalog(format!(
            "plan '{}' has a negative price",
            tier.name
        )));
    }
    if tier.overage_rate_per_token < Decimal::ZERO {
        return Err(Error::InvalidCatalog(format!(
            "plan '{}' has a negative overage rate",
            tier.name
        )));
    }
    if tier.monthly_price > MAX_MONTHLY_PRICE {
        return Err(Error::InvalidCatalog(format!(
            "plan '{}' price exceeds {}",
            tier.name, MAX_MONTHLY_PRICE
        )));
    }
    if tier.overage_rate_per_token > MAX_OVERAGE_RATE {
        return Err(Error::InvalidCatalog(format!(
            "plan '{}' overage rate exceeds {}",
            tier.name, MAX_OVERAGE_RATE
        )));
    }
    Ok(())
}

impl Catalog {
    pub fn new(services: Vec<ServiceEntry>, plans: Vec<PlanTier>) -> Result<Self> {
        Ok(Self {
            services: ServiceCatalog::new(services)?,
            plans: PlanCatalog::new(plans)?,
        })
    }

    /// Built-in service and plan tables
    pub fn builtin() -> Self {
        Self {
            services: ServiceCatalog {
                entries: builtin_services(),
            },
            plans: PlanCatalog {
                tiers: builtin_plans(),
            },
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Token cost per unit for each built-in service
pub fn builtin_services() -> Vec<ServiceEntry> {
    vec![
        ServiceEntry::new("Personal Photos", 7),
        ServiceEntry::new("Contracts", 7),
        ServiceEntry::new("Stamp, Signature, and QR", 5),
        ServiceEntry::new("Passports", 7),
        ServiceEntry::new("ID", 5),
        ServiceEntry::new("Invoices", 7),
        ServiceEntry::new("Entry Permit File", 4),
        ServiceEntry::new("Residency File", 4),
        ServiceEntry::new("Immigration File", 4),
    ]
}

/// Built-in price list, smallest tier first
pub fn builtin_plans() -> Vec<PlanTier> {
    let tier = |name: &str, price: Decimal, included: u64, rate: Decimal| {
        PlanTier::new(name, price, included, rate)
    };

    vec![
        tier("Starter", dec!(99), 2_000, dec!(0.0590)),
        tier("Builder", dec!(399), 9_000, dec!(0.0528)),
        tier("Professional", dec!(999), 25_000, dec!(0.0476)),
        tier("Advanced", dec!(2499), 70_000, dec!(0.0426)),
        tier("Enterprise", dec!(5499), 180_000, dec!(0.0364)),
        tier("Ultimate", dec!(9999), 400_000, dec!(0.0298)),
        tier("Titan", dec!(14999), 750_000, dec!(0.0238)),
    ]
}
