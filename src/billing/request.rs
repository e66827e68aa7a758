//! Loosely typed quote requests.
//!
//! Callers that are not constrained by a selection widget (JSON input, the
//! command line, tests) send option values as plain strings and integers.
//! [`QuoteRequest::resolve`] turns them into typed options and rejects any
//! value outside its enumeration with [`Error::InvalidOption`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{BillingOptions, Cadence, DiscountMode, PaymentOption, Strategy, Term, UsageRequest};
use crate::error::{Error, Result};

/// Typed fallbacks for options a request leaves out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteDefaults {
    pub cadence: Cadence,
    pub payment: PaymentOption,
    pub term: Term,
    pub strategy: Strategy,
    pub discount_mode: DiscountMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuoteRequest {
    #[serde(default)]
    pub usage: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_years: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_mode: Option<String>,
}

impl QuoteRequest {
    /// Parse a `Service=COUNT` argument and add it to the usage map.
    ///
    /// The split happens at the last `=`, so service names may contain
    /// commas and spaces.
    pub fn add_usage_arg(&mut self, arg: &str) -> Result<()> {
        let (service, count) = arg
            .rsplit_once('=')
            .ok_or_else(|| Error::InvalidUsage(arg.to_string()))?;
        let service = service.trim();
        if service.is_empty() {
            return Err(Error::InvalidUsage(arg.to_string()));
        }
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| Error::InvalidUsage(arg.to_string()))?;

        let slot = self.usage.entry(service.to_string()).or_insert(0);
        *slot = slot.saturating_add(count);
        Ok(())
    }

    /// Merge another request: its usage accumulates and its options win
    pub fn merge(&mut self, other: QuoteRequest) {
        for (service, count) in other.usage {
            let slot = self.usage.entry(service).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        if other.cadence.is_some() {
            self.cadence = other.cadence;
        }
        if other.payment.is_some() {
            self.payment = other.payment;
        }
        if other.term_years.is_some() {
            self.term_years = other.term_years;
        }
        if other.strategy.is_some() {
            self.strategy = other.strategy;
        }
        if other.discount_mode.is_some() {
            self.discount_mode = other.discount_mode;
        }
    }

    /// Validate every option; any invalid one rejects the whole request
    pub fn resolve(&self, defaults: &QuoteDefaults) -> Result<(UsageRequest, BillingOptions)> {
        let cadence = parse_or(self.cadence.as_deref(), defaults.cadence)?;
        let payment = parse_or(self.payment.as_deref(), defaults.payment)?;
        let term = match self.term_years {
            Some(years) => Term::try_from(years)?,
            None => defaults.term,
        };
        let strategy = parse_or(self.strategy.as_deref(), defaults.strategy)?;
        let discount_mode = parse_or(self.discount_mode.as_deref(), defaults.discount_mode)?;

        let usage = UsageRequest {
            counts: self.usage.clone(),
            cadence,
        };
        let options = BillingOptions {
            payment,
            term,
            strategy,
            discount_mode,
        };

        Ok((usage, options))
    }
}

fn parse_or<T>(value: Option<&str>, default: T) -> Result<T>
where
    T: std::str::FromStr<Err = Error>,
{
    match value {
        Some(raw) => raw.parse(),
        None => Ok(default),
    }
}
