//! Syntactic checks run before any query is issued.
//!
//! Passing validation says nothing about whether the domain is registered or
//! resolvable, it only keeps malformed input away from the resolver.

use crate::{Error, Result};
use lazy_regex::regex_is_match;

/// Longest name a resolver accepts, in presentation form without the root dot.
pub const MAX_DOMAIN_LEN: usize = 253;
pub const MAX_LABEL_LEN: usize = 63;

/// Returns the lowercased domain if it is a plausible fully qualified hostname.
pub fn validate_domain(input: &str) -> Result<String> {
    let domain = input.trim();
    if domain.is_empty() {
        return Err(Error::MissingDomain);
    }

    if domain.len() > MAX_DOMAIN_LEN
        || !regex_is_match!(r"^([a-z0-9]+(-[a-z0-9]+)*\.)+[a-z]{2,}$"i, domain)
        || !domain.split('.').all(is_valid_label)
    {
        return Err(Error::InvalidDomainFormat(domain.to_string()));
    }

    Ok(domain.to_ascii_lowercase())
}

/// A single label as found in a wordlist (`www`, `mail-2`, `01`).
pub fn is_valid_label(label: &str) -> bool {
    label.len() <= MAX_LABEL_LEN && regex_is_match!(r"^[a-z0-9]+(-[a-z0-9]+)*$"i, label)
}
