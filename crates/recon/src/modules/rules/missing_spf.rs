use super::{Rule, ScanContext};
use crate::model::{Severity, Vulnerability};
use crate::modules::Module;

// region:        --- Module info

pub struct MissingSpf {}

impl MissingSpf {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for MissingSpf {
    fn name(&self) -> String {
        "rules/missing_spf".to_string()
    }

    fn description(&self) -> String {
        "Check for an SPF policy in the apex TXT records".to_string()
    }
}

// endregion:     --- Module info

impl Rule for MissingSpf {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability> {
        if ctx.txt_records.iter().any(|txt| txt.contains("v=spf1")) {
            return Vec::new();
        }

        vec![Vulnerability::new(
            "Missing SPF Record",
            Severity::High,
            format!(
                "No SPF (Sender Policy Framework) record found for {}. This allows email spoofing.",
                ctx.domain
            ),
            "Add an SPF record to your DNS: v=spf1 include:_spf.google.com ~all",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::IpIndex;

    fn evaluate(txt_records: &[String]) -> Vec<Vulnerability> {
        let ip_index = IpIndex::default();
        let ctx = ScanContext {
            domain: "example.com",
            txt_records,
            subdomains: &[],
            ip_index: &ip_index,
        };
        MissingSpf::new().evaluate(&ctx)
    }

    #[test]
    fn fires_without_spf() {
        let findings = evaluate(&["google-site-verification=abc".to_string()]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, "Missing SPF Record");
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].description.contains("example.com"));
    }

    #[test]
    fn silent_with_spf() {
        assert!(evaluate(&["v=spf1 -all".to_string()]).is_empty());
    }

    #[test]
    fn token_is_case_sensitive() {
        assert_eq!(evaluate(&["V=SPF1 -all".to_string()]).len(), 1);
    }
}
