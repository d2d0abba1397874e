use crate::config::ScanConfig;
use crate::dns::{DnsResolver, QueryOutcome};
use crate::model::{EnumerationReport, LookupReport, RecordType, ScanReport};
use crate::modules::{self, rules::ScanContext};
use crate::records::{resolve_records, ApexRecords};
use crate::scheduler::enumerate;
use crate::validate::validate_domain;
use crate::{Error, Result};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, instrument, trace};

// region:        --- Scan main functions

/// Full report: apex records, discovered subdomains and classifier findings.
#[instrument(name = "scan", level = "info", skip_all, fields(target = target))]
pub async fn scan(dns_resolver: &DnsResolver, target: &str, config: &ScanConfig) -> Result<ScanReport> {
    let domain = validate_domain(target)?;
    config.validate()?;
    trace!("Start scan on {}", domain);

    let (apex, enumeration) = tokio::join!(
        resolve_records(dns_resolver, &domain),
        enumerate(dns_resolver, &domain, config)
    );
    ensure_reachable(&apex)?;

    let txt_records = apex.txt_values();
    let ip_index = enumeration.aggregator.ip_index();
    let subdomains = enumeration.aggregator.into_entries();

    let vulnerabilities = modules::classify(&ScanContext {
        domain: &domain,
        txt_records: &txt_records,
        subdomains: &subdomains,
        ip_index: &ip_index,
    });

    info!(
        "{} records, {} subdomains, {} findings",
        apex.records.len(),
        subdomains.len(),
        vulnerabilities.len()
    );

    Ok(ScanReport {
        mx_records: apex.mx_records(),
        records: apex.records,
        domain,
        subdomains,
        txt_records,
        vulnerabilities,
        stats: enumeration.stats,
        timestamp: timestamp()?,
    })
}

/// Apex record set only.
#[instrument(name = "lookup", level = "info", skip_all, fields(target = target))]
pub async fn lookup(dns_resolver: &DnsResolver, target: &str) -> Result<LookupReport> {
    let domain = validate_domain(target)?;

    let apex = resolve_records(dns_resolver, &domain).await;
    ensure_reachable(&apex)?;

    Ok(LookupReport {
        domain,
        records: apex.records,
        timestamp: timestamp()?,
    })
}

/// Subdomain discovery only, names sorted.
#[instrument(name = "enumerate", level = "info", skip_all, fields(target = target))]
pub async fn enumerate_subdomains(
    dns_resolver: &DnsResolver,
    target: &str,
    config: &ScanConfig,
) -> Result<EnumerationReport> {
    let domain = validate_domain(target)?;
    config.validate()?;
    preflight(dns_resolver, &domain).await?;

    let enumeration = enumerate(dns_resolver, &domain, config).await;
    let subdomains: Vec<String> = enumeration
        .aggregator
        .entries()
        .map(|entry| entry.name.clone())
        .collect();

    Ok(EnumerationReport {
        domain,
        count: subdomains.len(),
        subdomains,
        stats: enumeration.stats,
        timestamp: timestamp()?,
    })
}

// endregion:     --- Scan main functions

// region:        --- Scan subfunctions

/// One SOA query before any batch starts; only a resolver fault fails it.
async fn preflight(dns_resolver: &DnsResolver, domain: &str) -> Result<()> {
    match dns_resolver.lookup(domain, RecordType::Soa).await {
        QueryOutcome::Fault(reason) => Err(Error::ResolverUnavailable(reason)),
        QueryOutcome::Found(_) | QueryOutcome::Absent => Ok(()),
    }
}

fn ensure_reachable(apex: &ApexRecords) -> Result<()> {
    if !apex.all_faulted() {
        return Ok(());
    }
    let reason = apex
        .faults
        .first()
        .map(|(_, reason)| reason.clone())
        .unwrap_or_default();
    Err(Error::ResolverUnavailable(reason))
}

fn timestamp() -> Result<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

// endregion:     --- Scan subfunctions

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = timestamp().unwrap();
        assert!(OffsetDateTime::parse(&ts, &Rfc3339).is_ok());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn all_faults_means_unreachable() {
        let apex = ApexRecords {
            records: Vec::new(),
            faults: RecordType::ALL
                .iter()
                .map(|record_type| (*record_type, "connection refused".to_string()))
                .collect(),
        };
        assert!(matches!(
            ensure_reachable(&apex),
            Err(Error::ResolverUnavailable(reason)) if reason == "connection refused"
        ));

        let partial = ApexRecords {
            faults: vec![(RecordType::Cname, "refused".to_string())],
            ..ApexRecords::default()
        };
        assert!(ensure_reachable(&partial).is_ok());
    }
}
