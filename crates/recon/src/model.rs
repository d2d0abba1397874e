use crate::Result;
use serde::Serialize;
use serde_json::{to_string_pretty, Value};
use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::Path;

// region:        --- Models

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Mx,
    Ns,
    Txt,
    Soa,
    Cname,
}

impl RecordType {
    /// Apex record set, in query order.
    pub const ALL: [RecordType; 7] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Mx,
        RecordType::Ns,
        RecordType::Txt,
        RecordType::Soa,
        RecordType::Cname,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
            RecordType::Txt => "TXT",
            RecordType::Soa => "SOA",
            RecordType::Cname => "CNAME",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiscoveryMethod {
    #[serde(rename = "DNS Brute Force")]
    BruteForce,
    #[serde(rename = "NS Record Analysis")]
    NsAnalysis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdomainEntry {
    pub name: String,
    pub ipv4: BTreeSet<Ipv4Addr>,
    pub ipv6: BTreeSet<Ipv6Addr>,
    pub method: DiscoveryMethod,
}

impl SubdomainEntry {
    pub fn is_resolved(&self) -> bool {
        !self.ipv4.is_empty() || !self.ipv6.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vulnerability {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

impl Vulnerability {
    pub fn new(
        kind: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            severity,
            description: description.into(),
            recommendation: recommendation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    pub exchange: String,
    pub priority: u16,
}

/// Counters collected while enumerating. Timeouts are kept apart from misses here only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub candidates: usize,
    pub duplicates_skipped: usize,
    pub probes: usize,
    pub found: usize,
    pub not_found: usize,
    pub timed_out: usize,
    pub batches_run: usize,
    pub batches_skipped: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub domain: String,
    pub records: Vec<DnsRecord>,
    pub subdomains: Vec<SubdomainEntry>,
    pub mx_records: Vec<MxRecord>,
    pub txt_records: Vec<String>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub stats: ScanStats,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub domain: String,
    pub records: Vec<DnsRecord>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumerationReport {
    pub domain: String,
    pub subdomains: Vec<String>,
    pub count: usize,
    pub stats: ScanStats,
    pub timestamp: String,
}

// endregion:     --- Models

// region:        --- Exporting utils

pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        Ok(false)
    } else {
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

pub fn export_to_json<T: Serialize>(result: &T, path: &Path) -> Result<()> {
    let json = to_string_pretty(result)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

pub fn render_markdown(report: &ScanReport) -> Result<String> {
    let mut md_content = String::new();
    writeln!(&mut md_content, "# Scan result for `{}`", report.domain)?;
    writeln!(&mut md_content)?;
    writeln!(&mut md_content, "*Generated at {}*", report.timestamp)?;

    writeln!(&mut md_content)?;
    writeln!(&mut md_content, "## DNS records")?;
    writeln!(&mut md_content)?;
    if report.records.is_empty() {
        writeln!(&mut md_content, "No record found for this domain")?;
    }
    for record in &report.records {
        match record.priority {
            Some(priority) => writeln!(
                &mut md_content,
                "- **{}** {} (priority {})",
                record.record_type, record.value, priority
            )?,
            None => writeln!(&mut md_content, "- **{}** {}", record.record_type, record.value)?,
        }
    }

    writeln!(&mut md_content)?;
    writeln!(&mut md_content, "## Subdomains ({})", report.subdomains.len())?;
    writeln!(&mut md_content)?;
    for subdomain in &report.subdomains {
        let ips: Vec<String> = subdomain
            .ipv4
            .iter()
            .map(|ip| ip.to_string())
            .chain(subdomain.ipv6.iter().map(|ip| ip.to_string()))
            .collect();
        writeln!(&mut md_content, "- `{}` ({})", subdomain.name, ips.join(", "))?;
    }

    writeln!(&mut md_content)?;
    writeln!(&mut md_content, "## Findings")?;
    if report.vulnerabilities.is_empty() {
        writeln!(&mut md_content)?;
        writeln!(&mut md_content, "No finding for this domain")?;
    }
    for finding in &report.vulnerabilities {
        writeln!(&mut md_content)?;
        writeln!(
            &mut md_content,
            "### {} ({:?})",
            finding.kind, finding.severity
        )?;
        writeln!(&mut md_content)?;
        writeln!(&mut md_content, "{}", finding.description)?;
        writeln!(&mut md_content)?;
        writeln!(&mut md_content, "> {}", finding.recommendation)?;
    }

    Ok(md_content)
}

pub fn export_to_markdown(report: &ScanReport, path: &Path) -> Result<()> {
    let md_content = render_markdown(report)?;
    let mut file = File::create(path)?;
    file.write_all(md_content.as_bytes())?;
    Ok(())
}

// endregion:     --- Exporting utils

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ScanReport {
        ScanReport {
            domain: "example.com".to_string(),
            records: vec![DnsRecord {
                record_type: RecordType::Mx,
                name: "example.com".to_string(),
                value: "mx.example.com".to_string(),
                ttl: Some(300),
                priority: Some(10),
                additional: None,
            }],
            subdomains: vec![SubdomainEntry {
                name: "ftp.example.com".to_string(),
                ipv4: BTreeSet::from(["203.0.113.10".parse().unwrap()]),
                ipv6: BTreeSet::new(),
                method: DiscoveryMethod::BruteForce,
            }],
            mx_records: vec![MxRecord {
                exchange: "mx.example.com".to_string(),
                priority: 10,
            }],
            txt_records: Vec::new(),
            vulnerabilities: vec![Vulnerability {
                kind: "Missing SPF Record".to_string(),
                severity: Severity::High,
                description: "No SPF record found.".to_string(),
                recommendation: "Add one.".to_string(),
            }],
            stats: ScanStats::default(),
            timestamp: "2024-05-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn report_json_shape() {
        let value = serde_json::to_value(report()).unwrap();

        assert_eq!(value["records"][0]["type"], "MX");
        assert_eq!(value["records"][0]["priority"], 10);
        assert!(value["records"][0].get("additional").is_none());
        assert_eq!(value["subdomains"][0]["method"], "DNS Brute Force");
        assert_eq!(value["mxRecords"][0]["exchange"], "mx.example.com");
        assert_eq!(value["vulnerabilities"][0]["type"], "Missing SPF Record");
        assert_eq!(value["vulnerabilities"][0]["severity"], "high");
    }

    #[test]
    fn markdown_lists_subdomains_and_findings() {
        let md = render_markdown(&report()).unwrap();

        assert!(md.starts_with("# Scan result for `example.com`"));
        assert!(md.contains("- `ftp.example.com` (203.0.113.10)"));
        assert!(md.contains("### Missing SPF Record (High)"));
        assert!(md.contains("- **MX** mx.example.com (priority 10)"));
    }

    #[test]
    fn exports_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("example.com");

        assert!(ensure_dir(&nested).unwrap());
        assert!(!ensure_dir(&nested).unwrap());

        let json_path = nested.join("run.json");
        export_to_json(&report(), &json_path).unwrap();
        let written = fs::read_to_string(&json_path).unwrap();
        assert!(written.contains("\"domain\": \"example.com\""));

        let md_path = nested.join("run.md");
        export_to_markdown(&report(), &md_path).unwrap();
        assert!(fs::read_to_string(&md_path).unwrap().contains("## Findings"));
    }
}
