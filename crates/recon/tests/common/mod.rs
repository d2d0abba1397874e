#![allow(dead_code)]

use async_trait::async_trait;
use domain_recon::dns::{Answer, AnswerData, DnsResolver, QueryOutcome, Resolve, SoaData};
use domain_recon::model::RecordType;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory resolver with per-name latency and injected faults.
#[derive(Default)]
pub struct FakeResolver {
    answers: HashMap<(String, RecordType), Vec<Answer>>,
    delays: HashMap<String, Duration>,
    default_delay: Option<Duration>,
    faults: HashSet<(String, RecordType)>,
    fail_everything: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    queries: Mutex<Vec<(String, RecordType)>>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query ends in a resolver fault.
    pub fn unreachable() -> Self {
        Self {
            fail_everything: true,
            ..Self::default()
        }
    }

    fn answer(mut self, name: &str, data: AnswerData) -> Self {
        let key = (name.to_string(), data.record_type());
        self.answers.entry(key).or_default().push(Answer::new(300, data));
        self
    }

    pub fn with_a(mut self, name: &str, ips: &[&str]) -> Self {
        for ip in ips {
            self = self.answer(name, AnswerData::A(ip.parse().unwrap()));
        }
        self
    }

    pub fn with_aaaa(mut self, name: &str, ips: &[&str]) -> Self {
        for ip in ips {
            self = self.answer(name, AnswerData::Aaaa(ip.parse().unwrap()));
        }
        self
    }

    pub fn with_txt(self, name: &str, fragments: &[&str]) -> Self {
        let fragments = fragments.iter().map(|f| f.as_bytes().to_vec()).collect();
        self.answer(name, AnswerData::Txt(fragments))
    }

    pub fn with_mx(self, name: &str, preference: u16, exchange: &str) -> Self {
        self.answer(
            name,
            AnswerData::Mx {
                preference,
                exchange: exchange.to_string(),
            },
        )
    }

    pub fn with_ns(self, name: &str, host: &str) -> Self {
        self.answer(name, AnswerData::Ns(host.to_string()))
    }

    pub fn with_soa(self, name: &str) -> Self {
        self.answer(
            name,
            AnswerData::Soa(SoaData {
                mname: format!("ns1.{}", name),
                rname: format!("hostmaster.{}", name),
                serial: 1,
                refresh: 7200,
                retry: 900,
                expire: 1209600,
                minimum: 300,
            }),
        )
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    pub fn with_fault(mut self, name: &str, record_type: RecordType) -> Self {
        self.faults.insert((name.to_string(), record_type));
        self
    }

    pub fn build(self) -> (Arc<FakeResolver>, DnsResolver) {
        let fake = Arc::new(self);
        let dns_resolver: DnsResolver = fake.clone();
        (fake, dns_resolver)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries_for(&self, name: &str, record_type: RecordType) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(queried, rt)| queried == name && *rt == record_type)
            .count()
    }
}

#[async_trait]
impl Resolve for FakeResolver {
    async fn lookup(&self, name: &str, record_type: RecordType) -> QueryOutcome<Vec<Answer>> {
        self.queries
            .lock()
            .unwrap()
            .push((name.to_string(), record_type));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if let Some(delay) = self.delays.get(name).copied().or(self.default_delay) {
            tokio::time::sleep(delay).await;
        }

        if self.fail_everything || self.faults.contains(&(name.to_string(), record_type)) {
            return QueryOutcome::Fault("connection refused".to_string());
        }

        match self.answers.get(&(name.to_string(), record_type)) {
            Some(answers) => QueryOutcome::Found(answers.clone()),
            None => QueryOutcome::Absent,
        }
    }
}
