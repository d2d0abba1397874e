pub mod admin_exposure;
pub mod dev_staging_exposure;
pub mod exposed_services;
pub mod https_reminder;
pub mod ip_colocation;
pub mod missing_dmarc;
pub mod missing_spf;

use super::Module;
use crate::aggregate::IpIndex;
use crate::model::{SubdomainEntry, Vulnerability};

/// Read-only view of a finished enumeration.
pub struct ScanContext<'a> {
    pub domain: &'a str,
    pub txt_records: &'a [String],
    pub subdomains: &'a [SubdomainEntry],
    pub ip_index: &'a IpIndex,
}

/// A pure check over the scan context. Rules never query DNS.
pub trait Rule: Module {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability>;
}

/// Subdomains whose lowercased name contains any of `terms`.
pub fn names_containing<'a>(
    subdomains: &'a [SubdomainEntry],
    terms: &[&str],
) -> Vec<&'a SubdomainEntry> {
    subdomains
        .iter()
        .filter(|subdomain| {
            let name = subdomain.name.to_lowercase();
            terms.iter().any(|term| name.contains(term))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{DiscoveryMethod, SubdomainEntry};
    use std::collections::BTreeSet;

    pub fn subdomain(name: &str, ip: &str) -> SubdomainEntry {
        SubdomainEntry {
            name: name.to_string(),
            ipv4: BTreeSet::from([ip.parse().unwrap()]),
            ipv6: BTreeSet::new(),
            method: DiscoveryMethod::BruteForce,
        }
    }
}
