//! Apex record set resolution.
//!
//! Each record type is queried independently. A type that is absent or whose
//! query fails contributes nothing; the caller only learns about faults
//! through [`ApexRecords::all_faulted`].

use crate::dns::{Answer, AnswerData, DnsResolver, QueryOutcome};
use crate::model::{DnsRecord, MxRecord, RecordType};
use futures::future::join_all;
use serde_json::json;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Default)]
pub struct ApexRecords {
    pub records: Vec<DnsRecord>,
    /// Record types whose query ended in a resolver fault, with the reason.
    pub faults: Vec<(RecordType, String)>,
}

impl ApexRecords {
    pub fn txt_values(&self) -> Vec<String> {
        self.values_of(RecordType::Txt)
    }

    /// MX exchanges, lowest priority value first.
    pub fn mx_records(&self) -> Vec<MxRecord> {
        let mut mx_records: Vec<MxRecord> = self
            .records
            .iter()
            .filter(|record| record.record_type == RecordType::Mx)
            .map(|record| MxRecord {
                exchange: record.value.clone(),
                priority: record.priority.unwrap_or_default(),
            })
            .collect();
        mx_records.sort_by_key(|mx| mx.priority);
        mx_records
    }

    /// True when no record type could be answered at all, found or absent.
    pub fn all_faulted(&self) -> bool {
        self.faults.len() == RecordType::ALL.len()
    }

    fn values_of(&self, record_type: RecordType) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.record_type == record_type)
            .map(|record| record.value.clone())
            .collect()
    }
}

#[instrument(name = "records", level = "info", skip_all, fields(domain = domain))]
pub async fn resolve_records(dns_resolver: &DnsResolver, domain: &str) -> ApexRecords {
    let outcomes = join_all(RecordType::ALL.into_iter().map(|record_type| {
        let dns_resolver = dns_resolver.clone();
        async move { (record_type, dns_resolver.lookup(domain, record_type).await) }
    }))
    .await;

    let mut apex = ApexRecords::default();
    for (record_type, outcome) in outcomes {
        match outcome {
            QueryOutcome::Found(answers) => {
                debug!("{:12} - {} ({})", "FOUND", record_type, answers.len());
                apex.records
                    .extend(answers.into_iter().map(|answer| to_record(domain, answer)));
            }
            QueryOutcome::Absent => debug!("{:12} - {}", "ABSENT", record_type),
            QueryOutcome::Fault(reason) => {
                debug!("{:12} - {}: {}", "FAULT", record_type, reason);
                apex.faults.push((record_type, reason));
            }
        }
    }

    info!("{} records resolved", apex.records.len());
    apex
}

fn to_record(domain: &str, answer: Answer) -> DnsRecord {
    let mut record = DnsRecord {
        record_type: answer.data.record_type(),
        name: domain.to_string(),
        value: String::new(),
        ttl: Some(answer.ttl),
        priority: None,
        additional: None,
    };

    match answer.data {
        AnswerData::A(ip) => record.value = ip.to_string(),
        AnswerData::Aaaa(ip) => record.value = ip.to_string(),
        AnswerData::Mx { preference, exchange } => {
            record.value = exchange;
            record.priority = Some(preference);
        }
        AnswerData::Ns(host) | AnswerData::Cname(host) => record.value = host,
        AnswerData::Txt(fragments) => record.value = join_txt_fragments(&fragments),
        AnswerData::Soa(soa) => {
            record.value = format!(
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            );
            record.additional = Some(json!({
                "nsname": soa.mname,
                "hostmaster": soa.rname,
                "serial": soa.serial,
                "refresh": soa.refresh,
                "retry": soa.retry,
                "expire": soa.expire,
                "minttl": soa.minimum,
            }));
        }
    }

    record
}

/// Reassembles the character-strings of one TXT record into a single value.
pub fn join_txt_fragments<B: AsRef<[u8]>>(fragments: &[B]) -> String {
    fragments
        .iter()
        .map(|fragment| String::from_utf8_lossy(fragment.as_ref()).into_owned())
        .collect::<Vec<String>>()
        .join(" ")
}
