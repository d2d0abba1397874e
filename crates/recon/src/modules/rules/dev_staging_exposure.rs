use super::{names_containing, Rule, ScanContext};
use crate::model::{Severity, Vulnerability};
use crate::modules::Module;

// region:        --- Module info

pub struct DevStagingExposure {}

impl DevStagingExposure {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for DevStagingExposure {
    fn name(&self) -> String {
        "rules/dev_staging_exposure".to_string()
    }

    fn description(&self) -> String {
        "Count publicly resolvable dev, staging and test subdomains".to_string()
    }
}

// endregion:     --- Module info

impl Rule for DevStagingExposure {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability> {
        let count = names_containing(ctx.subdomains, &["dev", "staging", "test"]).len();
        if count == 0 {
            return Vec::new();
        }

        vec![Vulnerability::new(
            "Development/Staging Subdomains Exposed",
            Severity::Medium,
            format!(
                "Found {} development/staging subdomains that may contain sensitive data.",
                count
            ),
            "Restrict access to development subdomains or use VPN/internal network only.",
        )]
    }
}
