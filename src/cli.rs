use clap::Parser;
use std::path::PathBuf;

use crate::billing::QuoteRequest;
use crate::error::Result;
use crate::utils::read_request;

#[derive(Parser, Debug, Default)]
#[command(name = "tokenplan")]
#[command(version, about = "Recommend a subscription plan and price it from monthly usage")]
pub struct Cli {
    /// Usage entry as "Service=COUNT" (repeatable)
    #[arg(short = 's', long = "usage", value_name = "SERVICE=COUNT")]
    pub usage: Vec<String>,

    /// Read usage (or a full quote request) as JSON from a file, "-" for stdin
    #[arg(short = 'f', long = "usage-file", value_name = "PATH")]
    pub usage_file: Option<PathBuf>,

    /// Usage cadence: monthly or annual
    #[arg(long)]
    pub cadence: Option<String>,

    /// Payment option: monthly or upfront
    #[arg(short = 'p', long)]
    pub payment: Option<String>,

    /// Subscription term in years: 1, 2 or 3
    #[arg(short = 't', long, value_name = "YEARS", allow_negative_numbers = true)]
    pub term: Option<i64>,

    /// Plan selection strategy: nearest-plan or cost-optimized
    #[arg(long)]
    pub strategy: Option<String>,

    /// How discounts combine: additive or multiplicative
    #[arg(long = "discount-mode", value_name = "MODE")]
    pub discount_mode: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Also price every plan against the token total
    #[arg(long)]
    pub compare: bool,

    /// List the billable services and their token costs
    #[arg(long = "list-services")]
    pub list_services: bool,

    /// List the subscription plans
    #[arg(long = "list-plans")]
    pub list_plans: bool,

    /// Use this config file instead of ~/.tokenplan/config.toml
    #[arg(long = "config-file", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether any quote-related input was given
    pub fn has_quote_input(&self) -> bool {
        !self.usage.is_empty() || self.usage_file.is_some()
    }

    /// Assemble a quote request: file contents first, then flags on top
    pub fn to_request(&self) -> Result<QuoteRequest> {
        let mut request = match &self.usage_file {
            Some(path) => read_request(path)?,
            None => QuoteRequest::default(),
        };

        for arg in &self.usage {
            request.add_usage_arg(arg)?;
        }

        request.merge(QuoteRequest {
            cadence: self.cadence.clone(),
            payment: self.payment.clone(),
            term_years: self.term,
            strategy: self.strategy.clone(),
            discount_mode: self.discount_mode.clone(),
            ..Default::default()
        });

        Ok(request)
    }
}
