use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::billing::{QuoteRequest, ServiceCatalog};
use crate::debug_println;
use crate::error::Result;

/// Read a usage document from a file, or from stdin when `path` is `-`.
///
/// Accepts either a bare `{"Service": count}` object or a full
/// [`QuoteRequest`] with `usage` and option fields.
pub fn read_request(path: &Path) -> Result<QuoteRequest> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    parse_request(&content)
}

/// Option-only documents such as `{"termYears": 3}` are requests, not usage:
/// the request shape is tried first and rejects unknown keys, so a bare map
/// falls through to the second parse.
pub fn parse_request(content: &str) -> Result<QuoteRequest> {
    let request_err = match serde_json::from_str::<QuoteRequest>(content) {
        Ok(request) => {
            debug_println!("input: quote request with {} services", request.usage.len());
            return Ok(request);
        }
        Err(e) => e,
    };

    match serde_json::from_str::<BTreeMap<String, u64>>(content) {
        Ok(usage) => {
            debug_println!("input: bare usage map with {} services", usage.len());
            Ok(QuoteRequest {
                usage,
                ..Default::default()
            })
        }
        Err(_) => Err(request_err.into()),
    }
}

/// Rewrite usage keys to their catalog spelling ("contracts" -> "Contracts").
/// Keys with no catalog match are kept verbatim and later ignored.
pub fn canonicalize_usage(services: &ServiceCatalog, request: &mut QuoteRequest) {
    let usage = std::mem::take(&mut request.usage);
    for (name, count) in usage {
        let key = services
            .canonical_name(&name)
            .map(str::to_string)
            .unwrap_or(name);
        let slot = request.usage.entry(key).or_insert(0);
        *slot = slot.saturating_add(count);
    }
}
