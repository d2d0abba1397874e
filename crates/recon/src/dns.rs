use crate::model::RecordType;
use crate::{Error, Result};
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoError;
use hickory_resolver::proto::rr::{Name, RData, RecordType as WireType};
use hickory_resolver::TokioAsyncResolver;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::{sync::Arc, time::Duration};
use tracing::{debug, trace};

pub const RESOLVE_DNS_TIMEOUT_MS: u64 = 4000;

pub type DnsResolver = Arc<dyn Resolve>;

// region:        --- Query outcome

/// Result of a single query. Absence is a normal answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome<T> {
    Found(T),
    Absent,
    Fault(String),
}

impl<T> QueryOutcome<T> {
    pub fn is_fault(&self) -> bool {
        matches!(self, QueryOutcome::Fault(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            QueryOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryOutcome<U> {
        match self {
            QueryOutcome::Found(value) => QueryOutcome::Found(f(value)),
            QueryOutcome::Absent => QueryOutcome::Absent,
            QueryOutcome::Fault(reason) => QueryOutcome::Fault(reason),
        }
    }
}

// endregion:     --- Query outcome

// region:        --- Answers

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub ttl: u32,
    pub data: AnswerData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Mx { preference: u16, exchange: String },
    Ns(String),
    /// Character-strings as sent on the wire, not yet joined.
    Txt(Vec<Vec<u8>>),
    Soa(SoaData),
    Cname(String),
}

impl AnswerData {
    pub fn record_type(&self) -> RecordType {
        match self {
            AnswerData::A(_) => RecordType::A,
            AnswerData::Aaaa(_) => RecordType::Aaaa,
            AnswerData::Mx { .. } => RecordType::Mx,
            AnswerData::Ns(_) => RecordType::Ns,
            AnswerData::Txt(_) => RecordType::Txt,
            AnswerData::Soa(_) => RecordType::Soa,
            AnswerData::Cname(_) => RecordType::Cname,
        }
    }
}

impl Answer {
    pub fn new(ttl: u32, data: AnswerData) -> Self {
        Self { ttl, data }
    }
}

// endregion:     --- Answers

#[async_trait]
pub trait Resolve: Send + Sync {
    /// Query `name` for one record type. Only answers of that type are returned.
    async fn lookup(&self, name: &str, record_type: RecordType) -> QueryOutcome<Vec<Answer>>;
}

// region:        --- Hickory backend

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    System,
    Google,
    Cloudflare,
    Quad9,
}

impl Upstream {
    pub const NAMES: [&'static str; 4] = ["system", "google", "cloudflare", "quad9"];

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "system" => Ok(Upstream::System),
            "google" => Ok(Upstream::Google),
            "cloudflare" => Ok(Upstream::Cloudflare),
            "quad9" => Ok(Upstream::Quad9),
            other => Err(Error::Config(format!("Unknown resolver: {other}"))),
        }
    }
}

pub struct HickoryResolver {
    inner: TokioAsyncResolver,
}

impl HickoryResolver {
    pub fn new(upstream: Upstream) -> Result<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_millis(RESOLVE_DNS_TIMEOUT_MS);
        debug!("DNS resolver options: {:?}", opts);

        let config = match upstream {
            Upstream::System => {
                let (config, _) = hickory_resolver::system_conf::read_system_conf()
                    .map_err(|err| Error::ResolverUnavailable(err.to_string()))?;
                config
            }
            Upstream::Google => ResolverConfig::google(),
            Upstream::Cloudflare => ResolverConfig::cloudflare(),
            Upstream::Quad9 => ResolverConfig::quad9(),
        };

        let inner = TokioAsyncResolver::tokio(config, opts);
        debug!("DNS resolver created: {:?}", upstream);
        Ok(Self { inner })
    }
}

pub fn new_resolver(upstream: Upstream) -> Result<DnsResolver> {
    Ok(Arc::new(HickoryResolver::new(upstream)?))
}

#[async_trait]
impl Resolve for HickoryResolver {
    async fn lookup(&self, name: &str, record_type: RecordType) -> QueryOutcome<Vec<Answer>> {
        let fqdn = match absolute_name(name) {
            Ok(fqdn) => fqdn,
            Err(err) => {
                debug!("{:12} - {} {}: {}", "FAULT", name, record_type, err);
                return QueryOutcome::Fault(err.to_string());
            }
        };

        match self.inner.lookup(fqdn, wire_type(record_type)).await {
            Ok(lookup) => {
                let answers: Vec<Answer> = lookup
                    .record_iter()
                    .filter_map(|record| {
                        let data = record.data().and_then(answer_data)?;
                        Some(Answer::new(record.ttl(), data))
                    })
                    .filter(|answer| answer.data.record_type() == record_type)
                    .collect();
                trace!("{:12} - {} {} ({})", "ANSWERED", name, record_type, answers.len());
                if answers.is_empty() {
                    QueryOutcome::Absent
                } else {
                    QueryOutcome::Found(answers)
                }
            }
            Err(err) => outcome_from_error(name, record_type, err),
        }
    }
}

/// Rooted form of `name`. The resolver never appends search domains to it.
pub fn absolute_name(name: &str) -> std::result::Result<Name, ProtoError> {
    let mut fqdn = Name::from_ascii(name)?;
    fqdn.set_fqdn(true);
    Ok(fqdn)
}

fn outcome_from_error<T>(name: &str, record_type: RecordType, err: ResolveError) -> QueryOutcome<T> {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => QueryOutcome::Absent,
        ResolveErrorKind::Timeout => {
            trace!("{:12} - {} {}", "TIMEOUT", name, record_type);
            QueryOutcome::Absent
        }
        _ => {
            debug!("{:12} - {} {}: {}", "FAULT", name, record_type, err);
            QueryOutcome::Fault(err.to_string())
        }
    }
}

fn wire_type(record_type: RecordType) -> WireType {
    match record_type {
        RecordType::A => WireType::A,
        RecordType::Aaaa => WireType::AAAA,
        RecordType::Mx => WireType::MX,
        RecordType::Ns => WireType::NS,
        RecordType::Txt => WireType::TXT,
        RecordType::Soa => WireType::SOA,
        RecordType::Cname => WireType::CNAME,
    }
}

fn answer_data(rdata: &RData) -> Option<AnswerData> {
    let data = match rdata {
        RData::A(a) => AnswerData::A(a.0),
        RData::AAAA(aaaa) => AnswerData::Aaaa(aaaa.0),
        RData::MX(mx) => AnswerData::Mx {
            preference: mx.preference(),
            exchange: host_name(&mx.exchange().to_utf8()),
        },
        RData::NS(ns) => AnswerData::Ns(host_name(&ns.0.to_utf8())),
        RData::TXT(txt) => AnswerData::Txt(txt.iter().map(|data| data.to_vec()).collect()),
        RData::SOA(soa) => AnswerData::Soa(SoaData {
            mname: host_name(&soa.mname().to_utf8()),
            rname: host_name(&soa.rname().to_utf8()),
            serial: soa.serial(),
            refresh: soa.refresh(),
            retry: soa.retry(),
            expire: soa.expire(),
            minimum: soa.minimum(),
        }),
        RData::CNAME(cname) => AnswerData::Cname(host_name(&cname.0.to_utf8())),
        _ => return None,
    };
    Some(data)
}

/// Lowercased host name without the root dot.
pub fn host_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

// endregion:     --- Hickory backend
