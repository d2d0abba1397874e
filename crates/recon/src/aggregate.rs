use crate::model::SubdomainEntry;
use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use tracing::trace;

/// Discovered subdomains keyed by name. The first entry recorded for a name is kept.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    entries: BTreeMap<String, SubdomainEntry>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns false when the name was already known or has no address.
    pub fn insert(&mut self, entry: SubdomainEntry) -> bool {
        if !entry.is_resolved() || self.entries.contains_key(&entry.name) {
            trace!("{:12} - {}", "SKIPPED", entry.name);
            return false;
        }
        self.entries.insert(entry.name.clone(), entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = &SubdomainEntry> {
        self.entries.values()
    }

    pub fn ip_index(&self) -> IpIndex {
        IpIndex::build(self.entries())
    }

    pub fn into_entries(self) -> Vec<SubdomainEntry> {
        self.entries.into_values().collect()
    }
}

/// IPv4 address to the subdomains resolving to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpIndex {
    by_ip: BTreeMap<IpAddr, BTreeSet<String>>,
}

impl IpIndex {
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a SubdomainEntry>) -> Self {
        let mut by_ip: BTreeMap<IpAddr, BTreeSet<String>> = BTreeMap::new();
        for entry in entries {
            for ip in &entry.ipv4 {
                by_ip
                    .entry(IpAddr::V4(*ip))
                    .or_default()
                    .insert(entry.name.clone());
            }
        }
        Self { by_ip }
    }

    pub fn get(&self, ip: &IpAddr) -> Option<&BTreeSet<String>> {
        self.by_ip.get(ip)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IpAddr, &BTreeSet<String>)> {
        self.by_ip.iter()
    }

    pub fn len(&self) -> usize {
        self.by_ip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ip.is_empty()
    }
}
