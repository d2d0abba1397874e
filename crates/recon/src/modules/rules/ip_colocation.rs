use super::{Rule, ScanContext};
use crate::model::{Severity, Vulnerability};
use crate::modules::Module;

/// More subdomains than this on one address is reported.
const MAX_SUBDOMAINS_PER_IP: usize = 5;

// region:        --- Module info

pub struct IpColocation {}

impl IpColocation {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for IpColocation {
    fn name(&self) -> String {
        "rules/ip_colocation".to_string()
    }

    fn description(&self) -> String {
        "Flag IPv4 addresses shared by many subdomains".to_string()
    }
}

// endregion:     --- Module info

impl Rule for IpColocation {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability> {
        ctx.ip_index
            .iter()
            .filter(|(_, names)| names.len() > MAX_SUBDOMAINS_PER_IP)
            .map(|(ip, names)| {
                Vulnerability::new(
                    "Multiple Subdomains on Same IP",
                    Severity::Low,
                    format!(
                        "{} subdomains share the same IP address ({}).",
                        names.len(),
                        ip
                    ),
                    "Consider load balancing or separate hosting for critical subdomains.",
                )
            })
            .collect()
    }
}
