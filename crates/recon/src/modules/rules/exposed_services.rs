use super::{Rule, ScanContext};
use crate::model::{Severity, Vulnerability};
use crate::modules::Module;

const EXPOSED_SERVICES: [&str; 4] = ["ftp", "telnet", "rdp", "vnc"];

// region:        --- Module info

pub struct ExposedServices {}

impl ExposedServices {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for ExposedServices {
    fn name(&self) -> String {
        "rules/exposed_services".to_string()
    }

    fn description(&self) -> String {
        "Flag subdomains named after FTP, Telnet, RDP or VNC".to_string()
    }
}

// endregion:     --- Module info

impl Rule for ExposedServices {
    fn evaluate(&self, ctx: &ScanContext) -> Vec<Vulnerability> {
        let mut findings = Vec::new();
        for subdomain in ctx.subdomains {
            let name = subdomain.name.to_lowercase();
            for service in EXPOSED_SERVICES {
                if !name.contains(service) {
                    continue;
                }
                let service = service.to_uppercase();
                findings.push(Vulnerability::new(
                    format!("Exposed {} Service", service),
                    Severity::Medium,
                    format!(
                        "Subdomain {} appears to expose {} service.",
                        subdomain.name, service
                    ),
                    "Ensure proper authentication and consider using VPN instead of direct exposure.",
                ));
            }
        }
        findings
    }
}
