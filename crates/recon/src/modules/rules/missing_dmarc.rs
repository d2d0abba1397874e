use super::{Rule, ScanContext};
use crate::model::{Severity, Vulnerability};
use crate::modules::Module;

// region:        --- Module info

pub struct MissingDmarc {}

impl MissingDmarc {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for MissingDmarc {
    fn name(&self) -> String {
        "rules/missing_dmarc".to_string()
    }

    fn description(&self) -> String {
        "Check for a DMARC policy in the apex TXT records".to_string()
    }
}

// endregion:     --- Module info

impl Rule for MissingDmarc {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability> {
        if ctx
            .txt_records
            .iter()
            .any(|txt| txt.to_lowercase().contains("v=dmarc1"))
        {
            return Vec::new();
        }

        vec![Vulnerability::new(
            "Missing DMARC Record",
            Severity::High,
            "No DMARC record found. This reduces email security.",
            format!(
                "Add a DMARC record: v=DMARC1; p=none; rua=mailto:admin@{}",
                ctx.domain
            ),
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
        MissingDmarc::new().evaluate(&ctx)
    }

    #[test]
    fn fires_without_dmarc() {
        let findings = evaluate(&["v=spf1 include:_spf.example.com ~all".to_string()]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].recommendation.ends_with("admin@example.com"));
    }

    #[test]
    fn match_ignores_case() {
        assert!(evaluate(&["v=DMARC1; p=reject".to_string()]).is_empty());
        assert!(evaluate(&["V=dmarc1; p=none".to_string()]).is_empty());
    }
}
