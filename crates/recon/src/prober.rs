use crate::config::ScanConfig;
use crate::dns::{AnswerData, DnsResolver, QueryOutcome};
use crate::model::{DiscoveryMethod, RecordType, SubdomainEntry};
use std::collections::BTreeSet;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found(SubdomainEntry),
    NotFound,
    /// Reported like `NotFound`, kept apart for the scan counters.
    TimedOut,
}

/// Outcome of one query raced against the probe timeout.
enum Raced<T> {
    Answered(T),
    Missed,
    Expired,
}

/// Resolves a single candidate name. Never fails: misses, faults and
/// timeouts all end in a terminal [`ProbeOutcome`].
#[derive(Clone)]
pub struct Prober {
    dns_resolver: DnsResolver,
    timeout: Duration,
    ipv6_fallback: bool,
}

impl Prober {
    pub fn new(dns_resolver: DnsResolver, config: &ScanConfig) -> Self {
        Self {
            dns_resolver,
            timeout: config.probe_timeout,
            ipv6_fallback: config.ipv6_fallback,
        }
    }

    pub async fn probe(&self, name: &str, method: DiscoveryMethod) -> ProbeOutcome {
        let ipv4 = match self.ipv4(name).await {
            Raced::Answered(ipv4) => ipv4,
            Raced::Missed if self.ipv6_fallback => return self.ipv6_only(name, method, false).await,
            Raced::Expired if self.ipv6_fallback => return self.ipv6_only(name, method, true).await,
            Raced::Missed => return ProbeOutcome::NotFound,
            Raced::Expired => {
                trace!("{:12} - {}", "TIMEOUT", name);
                return ProbeOutcome::TimedOut;
            }
        };

        // best effort, a miss here keeps the IPv4 entry as is
        let ipv6 = match self.ipv6(name).await {
            Raced::Answered(ipv6) => ipv6,
            _ => BTreeSet::new(),
        };

        debug!("{:12} - {} ({} v4, {} v6)", "RESOLVED", name, ipv4.len(), ipv6.len());
        ProbeOutcome::Found(SubdomainEntry {
            name: name.to_string(),
            ipv4,
            ipv6,
            method,
        })
    }

    async fn ipv6_only(&self, name: &str, method: DiscoveryMethod, ipv4_expired: bool) -> ProbeOutcome {
        match self.ipv6(name).await {
            Raced::Answered(ipv6) => {
                debug!("{:12} - {} ({} v6)", "RESOLVED", name, ipv6.len());
                ProbeOutcome::Found(SubdomainEntry {
                    name: name.to_string(),
                    ipv4: BTreeSet::new(),
                    ipv6,
                    method,
                })
            }
            Raced::Expired => ProbeOutcome::TimedOut,
            Raced::Missed if ipv4_expired => ProbeOutcome::TimedOut,
            Raced::Missed => ProbeOutcome::NotFound,
        }
    }

    async fn ipv4(&self, name: &str) -> Raced<BTreeSet<Ipv4Addr>> {
        self.race(name, RecordType::A, |data| match data {
            AnswerData::A(ip) => Some(ip),
            _ => None,
        })
        .await
    }

    async fn ipv6(&self, name: &str) -> Raced<BTreeSet<Ipv6Addr>> {
        self.race(name, RecordType::Aaaa, |data| match data {
            AnswerData::Aaaa(ip) => Some(ip),
            _ => None,
        })
        .await
    }

    async fn race<T: Ord>(
        &self,
        name: &str,
        record_type: RecordType,
        extract: impl Fn(AnswerData) -> Option<T>,
    ) -> Raced<BTreeSet<T>> {
        match timeout(self.timeout, self.dns_resolver.lookup(name, record_type)).await {
            Ok(QueryOutcome::Found(answers)) => {
                let values: BTreeSet<T> = answers
                    .into_iter()
                    .filter_map(|answer| extract(answer.data))
                    .collect();
                if values.is_empty() {
                    Raced::Missed
                } else {
                    Raced::Answered(values)
                }
            }
            Ok(QueryOutcome::Absent) => Raced::Missed,
            Ok(QueryOutcome::Fault(reason)) => {
                trace!("{:12} - {} {}: {}", "FAULT", name, record_type, reason);
                Raced::Missed
            }
            Err(_) => Raced::Expired,
        }
    }
}
