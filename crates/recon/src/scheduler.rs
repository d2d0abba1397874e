//! Subdomain discovery: wordlist brute force in fixed-size batches, plus
//! candidates derived from the apex name servers.
//!
//! A batch is fully drained before the next one starts, so at most
//! `batch_size` probes are in flight and every aggregator write happens
//! from this single flow of control.

use crate::aggregate::Aggregator;
use crate::config::ScanConfig;
use crate::dns::{host_name, AnswerData, DnsResolver, QueryOutcome};
use crate::model::{DiscoveryMethod, RecordType, ScanStats};
use crate::prober::{ProbeOutcome, Prober};
use crate::validate::{is_valid_label, MAX_DOMAIN_LEN};
use futures::future::join_all;
use futures::{stream, StreamExt};
use std::collections::HashSet;
use tokio::time::{timeout, Instant};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    pub aggregator: Aggregator,
    pub stats: ScanStats,
}

#[instrument(name = "subdomains", level = "info", skip_all, fields(domain = domain))]
pub async fn enumerate(dns_resolver: &DnsResolver, domain: &str, config: &ScanConfig) -> Enumeration {
    let started = Instant::now();
    let deadline = config.deadline.map(|budget| started + budget);
    let prober = Prober::new(dns_resolver.clone(), config);

    let mut enumeration = Enumeration::default();
    let candidates = candidate_names(domain, &config.wordlist);

    let ns_path = async {
        if config.ns_analysis {
            ns_analysis(dns_resolver, &prober, domain, config, &candidates).await
        } else {
            (Vec::new(), 0)
        }
    };
    let brute_force_path = brute_force(&prober, &candidates, config, deadline, &mut enumeration);
    let ((), (ns_outcomes, ns_skipped)) = tokio::join!(brute_force_path, ns_path);

    // after the brute force so a name found by both keeps its brute force entry
    enumeration.stats.duplicates_skipped += ns_skipped;
    merge(ns_outcomes, &mut enumeration);

    enumeration.stats.elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        "{} subdomains found in {} ms",
        enumeration.aggregator.len(),
        enumeration.stats.elapsed_ms
    );
    enumeration
}

// region:        --- Brute force

async fn brute_force(
    prober: &Prober,
    candidates: &[String],
    config: &ScanConfig,
    deadline: Option<Instant>,
    enumeration: &mut Enumeration,
) {
    enumeration.stats.candidates += candidates.len();

    let batches: Vec<&[String]> = candidates.chunks(config.batch_size).collect();
    let total = batches.len();
    info!("{} candidates in {} batches", candidates.len(), total);

    for (i, batch) in batches.into_iter().enumerate() {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            enumeration.stats.batches_skipped = total - i;
            warn!("Deadline reached, skipping {} remaining batches", total - i);
            break;
        }

        let outcomes = run_batch(prober, batch, config.batch_size, enumeration).await;
        merge(outcomes, enumeration);
        enumeration.stats.batches_run += 1;
        debug!(
            "{:12} - {}/{} ({} found so far)",
            "BATCH",
            i + 1,
            total,
            enumeration.aggregator.len()
        );
    }
}

#[instrument(name = "batch", level = "debug", skip_all, fields(size = batch.len()))]
async fn run_batch(
    prober: &Prober,
    batch: &[String],
    concurrency: usize,
    enumeration: &mut Enumeration,
) -> Vec<ProbeOutcome> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut to_probe: Vec<&str> = Vec::with_capacity(batch.len());
    for name in batch {
        if enumeration.aggregator.contains(name) || !seen.insert(name.as_str()) {
            enumeration.stats.duplicates_skipped += 1;
        } else {
            to_probe.push(name.as_str());
        }
    }

    enumeration.stats.probes += to_probe.len();
    stream::iter(to_probe)
        .map(|name| prober.probe(name, DiscoveryMethod::BruteForce))
        .buffered(concurrency)
        .collect()
        .await
}

/// `label.domain` for every usable wordlist entry, lowercased, in wordlist order.
pub fn candidate_names(domain: &str, wordlist: &[String]) -> Vec<String> {
    wordlist
        .iter()
        .map(|label| label.trim().to_ascii_lowercase())
        .filter(|label| {
            let usable = !label.is_empty() && label.split('.').all(is_valid_label);
            if !usable {
                warn!("Skipping invalid wordlist entry: {:?}", label);
            }
            usable
        })
        .map(|label| format!("{}.{}", label, domain))
        .filter(|name| name.len() <= MAX_DOMAIN_LEN)
        .collect()
}

// endregion:     --- Brute force

// region:        --- NS analysis

/// Returns the probe outcomes and how many derived names the wordlist already covers.
#[instrument(name = "ns_analysis", level = "info", skip_all)]
async fn ns_analysis(
    dns_resolver: &DnsResolver,
    prober: &Prober,
    domain: &str,
    config: &ScanConfig,
    wordlist_candidates: &[String],
) -> (Vec<ProbeOutcome>, usize) {
    let hosts: Vec<String> = match timeout(config.probe_timeout, dns_resolver.lookup(domain, RecordType::Ns)).await {
        Ok(QueryOutcome::Found(answers)) => answers
            .into_iter()
            .filter_map(|answer| match answer.data {
                AnswerData::Ns(host) => Some(host),
                _ => None,
            })
            .collect(),
        Ok(_) | Err(_) => {
            debug!("No NS record to analyse");
            return (Vec::new(), 0);
        }
    };

    let derived = ns_candidates(domain, &hosts);
    let candidates = not_in_wordlist(derived.clone(), wordlist_candidates);
    let skipped = derived.len() - candidates.len();
    info!(
        "{} candidates from {} name servers ({} already in wordlist)",
        candidates.len(),
        hosts.len(),
        skipped
    );

    let outcomes = join_all(
        candidates
            .iter()
            .map(|name| prober.probe(name, DiscoveryMethod::NsAnalysis)),
    )
    .await;
    (outcomes, skipped)
}

/// Drops derived names the brute force path probes anyway.
fn not_in_wordlist(derived: Vec<String>, wordlist_candidates: &[String]) -> Vec<String> {
    let covered: HashSet<&str> = wordlist_candidates.iter().map(String::as_str).collect();
    derived
        .into_iter()
        .filter(|name| !covered.contains(name.as_str()))
        .collect()
}

/// Strips the two rightmost labels of each name server and re-roots the rest
/// under `domain` (`ns1.provider.net` -> `ns1.example.com`).
pub fn ns_candidates(domain: &str, hosts: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    hosts
        .iter()
        .filter_map(|host| {
            let host = host_name(host);
            let labels: Vec<&str> = host.split('.').collect();
            if labels.len() <= 2 {
                return None;
            }
            let prefix = labels[..labels.len() - 2].join(".");
            Some(format!("{}.{}", prefix, domain))
        })
        .filter(|name| name.len() <= MAX_DOMAIN_LEN && seen.insert(name.clone()))
        .collect()
}

// endregion:     --- NS analysis

fn merge(outcomes: Vec<ProbeOutcome>, enumeration: &mut Enumeration) {
    for outcome in outcomes {
        match outcome {
            ProbeOutcome::Found(entry) => {
                if enumeration.aggregator.insert(entry) {
                    enumeration.stats.found += 1;
                } else {
                    enumeration.stats.duplicates_skipped += 1;
                }
            }
            ProbeOutcome::NotFound => enumeration.stats.not_found += 1,
            ProbeOutcome::TimedOut => enumeration.stats.timed_out += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_follow_wordlist() {
        let wordlist: Vec<String> = ["www", " FTP ", "", "bad_one", "dev.api"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            candidate_names("example.com", &wordlist),
            vec!["www.example.com", "ftp.example.com", "dev.api.example.com"]
        );
    }

    #[test]
    fn ns_candidates_strip_provider_labels() {
        let hosts: Vec<String> = [
            "ns1.example.com.",
            "ns-123.awsdns-45.org",
            "NS1.Example.com",
            "example.com",
            "dns.a.b.provider.net",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(
            ns_candidates("example.com", &hosts),
            vec!["ns1.example.com", "ns-123.example.com", "dns.a.b.example.com"]
        );
    }

    #[test]
    fn ns_candidates_covered_by_wordlist_are_dropped() {
        let wordlist = vec!["ns1".to_string(), "www".to_string()];
        let candidates = candidate_names("example.com", &wordlist);
        let derived = ns_candidates(
            "example.com",
            &["ns1.provider.net".to_string(), "ns2.provider.net".to_string()],
        );

        assert_eq!(not_in_wordlist(derived, &candidates), vec!["ns2.example.com"]);
    }

    #[test]
    fn oversized_candidates_are_skipped() {
        // 249 bytes, so only labels of up to 3 bytes still fit
        let domain = format!("{}com", "a.".repeat(123));
        let wordlist = vec!["www".to_string(), "mail".to_string()];

        assert_eq!(
            candidate_names(&domain, &wordlist),
            vec![format!("www.{}", domain)]
        );
    }
}
