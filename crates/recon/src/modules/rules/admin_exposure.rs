use super::{names_containing, Rule, ScanContext};
use crate::model::{Severity, Vulnerability};
use crate::modules::Module;

// region:        --- Module info

pub struct AdminExposure {}

impl AdminExposure {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for AdminExposure {
    fn name(&self) -> String {
        "rules/admin_exposure".to_string()
    }

    fn description(&self) -> String {
        "Count admin and management subdomains".to_string()
    }
}

// endregion:     --- Module info

impl Rule for AdminExposure {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability> {
        let count = names_containing(ctx.subdomains, &["admin", "manage", "control"]).len();
        if count == 0 {
            return Vec::new();
        }

        vec![Vulnerability::new(
            "Admin/Management Subdomains Found",
            Severity::Low,
            format!("Found {} admin/management subdomains.", count),
            "Ensure these subdomains have strong authentication and are not publicly accessible.",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::IpIndex;
    use crate::modules::rules::fixtures::subdomain;

    #[test]
    fn counts_admin_names() {
        let subdomains = vec![
            subdomain("admin.example.com", "192.0.2.1"),
            subdomain("management.example.com", "192.0.2.2"),
            subdomain("mission-control.example.com", "192.0.2.3"),
            subdomain("api.example.com", "192.0.2.4"),
        ];
        let ip_index = IpIndex::build(&subdomains);
        let ctx = ScanContext {
            domain: "example.com",
            txt_records: &[],
            subdomains: &subdomains,
            ip_index: &ip_index,
        };

        let findings = AdminExposure::new().evaluate(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert_eq!(findings[0].description, "Found 3 admin/management subdomains.");
    }
}
