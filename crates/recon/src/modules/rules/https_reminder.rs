use super::{Rule, ScanContext};
use crate::model::{Severity, Vulnerability};
use crate::modules::Module;

// region:        --- Module info

pub struct HttpsReminder {}

impl HttpsReminder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for HttpsReminder {
    fn name(&self) -> String {
        "rules/https_reminder".to_string()
    }

    fn description(&self) -> String {
        "Recommend TLS verification once subdomains are known".to_string()
    }
}

// endregion:     --- Module info

impl Rule for HttpsReminder {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability> {
        if ctx.subdomains.is_empty() {
            return Vec::new();
        }

        vec![Vulnerability::new(
            "HTTPS Verification Recommended",
            Severity::Medium,
            format!(
                "Verify all {} subdomains of {} use HTTPS and have valid SSL certificates.",
                ctx.subdomains.len(),
                ctx.domain
            ),
            "Run SSL/TLS scanning on all discovered subdomains.",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::IpIndex;
    use crate::modules::rules::fixtures::subdomain;

    #[test]
    fn only_with_subdomains() {
        let ip_index = IpIndex::default();
        let empty = ScanContext {
            domain: "example.com",
            txt_records: &[],
            subdomains: &[],
            ip_index: &ip_index,
        };
        assert!(HttpsReminder::new().evaluate(&empty).is_empty());

        let subdomains = vec![subdomain("www.example.com", "192.0.2.1")];
        let ctx = ScanContext {
            subdomains: &subdomains,
            ..empty
        };
        let findings = HttpsReminder::new().evaluate(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
    }
}
