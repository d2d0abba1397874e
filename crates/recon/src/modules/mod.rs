pub mod rules;

use self::rules::admin_exposure::AdminExposure;
use self::rules::dev_staging_exposure::DevStagingExposure;
use self::rules::exposed_services::ExposedServices;
use self::rules::https_reminder::HttpsReminder;
use self::rules::ip_colocation::IpColocation;
use self::rules::missing_dmarc::MissingDmarc;
use self::rules::missing_spf::MissingSpf;
use self::rules::{Rule, ScanContext};
use crate::model::Vulnerability;
use tracing::{debug, info, instrument};

pub trait Module {
    fn name(&self) -> String;
    fn description(&self) -> String;
}

/// Classifier rules in evaluation order. Findings keep this order.
pub fn rule_modules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(MissingSpf::new()),
        Box::new(MissingDmarc::new()),
        Box::new(ExposedServices::new()),
        Box::new(DevStagingExposure::new()),
        Box::new(AdminExposure::new()),
        Box::new(IpColocation::new()),
        Box::new(HttpsReminder::new()),
    ]
}

#[instrument(name = "classify", level = "info", skip_all)]
pub fn classify(ctx: &ScanContext) -> Vec<Vulnerability> {
    let vulnerabilities: Vec<Vulnerability> = rule_modules()
        .iter()
        .flat_map(|rule| {
            let findings = rule.evaluate(ctx);
            debug!("{:12} - {} ({})", "EVALUATED", rule.name(), findings.len());
            findings
        })
        .collect();

    info!("{} findings", vulnerabilities.len());
    vulnerabilities
}

pub fn display_all() {
    println!("\nClassifier rules");
    for module in rule_modules() {
        println!("- {:35}{}", module.name(), module.description());
    }
}
