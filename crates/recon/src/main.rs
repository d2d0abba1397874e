use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use domain_recon::config::{load_wordlist, ScanConfig, DEFAULT_BATCH_SIZE, DEFAULT_PROBE_TIMEOUT_MS};
use domain_recon::dns::{new_resolver, Upstream};
use domain_recon::model::{ensure_dir, export_to_json, export_to_markdown, EnumerationReport, LookupReport, ScanReport};
use domain_recon::utils::log::init_tracing_subscriber;
use domain_recon::validate::validate_domain;
use domain_recon::{modules, scan, Error, ErrorResponse, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{error, info};

enum Outcome {
    Lookup(LookupReport),
    Enumerate(EnumerationReport),
    Scan(ScanReport),
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:12} - {}", "FAILED", err);
            let body = ErrorResponse::from(&err);
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", body.error),
            }
            if err.is_client_fault() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn cli() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .subcommand(Command::new("modules").about("List all classifier rules"))
        .subcommand(
            Command::new("lookup")
                .about("Resolve the apex record set of a domain")
                .args(common_args(&["json", "stdout"], "json")),
        )
        .subcommand(
            Command::new("enumerate")
                .about("Discover subdomains by wordlist brute force and NS analysis")
                .args(common_args(&["json", "stdout"], "json"))
                .args(enumeration_args()),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan a target: records, subdomains and findings")
                .args(common_args(&["json", "md", "both", "stdout"], "both"))
                .args(enumeration_args()),
        )
        .arg_required_else_help(true)
}

fn common_args(formats: &'static [&'static str], default_format: &'static str) -> Vec<Arg> {
    vec![
        Arg::new("target")
            .help("The domain name to scan")
            .value_name("TARGET")
            .required(true)
            .index(1),
        Arg::new("logs")
            .short('s')
            .long("logs")
            .action(ArgAction::SetTrue)
            .help("Save logs into a .log file"),
        Arg::new("output")
            .short('o')
            .long("output")
            .help("Output format")
            .value_name("OUTPUT")
            .value_parser(formats.to_vec())
            .default_value(default_format),
        Arg::new("resolver")
            .long("resolver")
            .help("Upstream DNS resolver")
            .value_name("RESOLVER")
            .value_parser(Upstream::NAMES.to_vec())
            .default_value("system"),
    ]
}

fn enumeration_args() -> Vec<Arg> {
    vec![
        Arg::new("wordlist")
            .short('w')
            .long("wordlist")
            .help("File with one subdomain label per line (built-in list if omitted)")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("batch-size")
            .short('b')
            .long("batch-size")
            .help(format!("Candidates resolved concurrently per batch [default: {}]", DEFAULT_BATCH_SIZE))
            .value_name("N")
            .value_parser(value_parser!(usize)),
        Arg::new("timeout-ms")
            .short('t')
            .long("timeout-ms")
            .help(format!("Per-query timeout [default: {}]", DEFAULT_PROBE_TIMEOUT_MS))
            .value_name("MS")
            .value_parser(value_parser!(u64)),
        Arg::new("deadline-ms")
            .long("deadline-ms")
            .help("Skip remaining batches once this much time has passed")
            .value_name("MS")
            .value_parser(value_parser!(u64)),
        Arg::new("ipv6-fallback")
            .long("ipv6-fallback")
            .action(ArgAction::SetTrue)
            .help("Query AAAA records for candidates without an A record"),
        Arg::new("no-ns-analysis")
            .long("no-ns-analysis")
            .action(ArgAction::SetTrue)
            .help("Do not derive candidates from the apex name servers"),
    ]
}

fn run() -> Result<()> {
    let cli = cli().get_matches();

    match cli.subcommand() {
        Some(("modules", _)) => modules::display_all(),
        Some((command @ ("lookup" | "enumerate" | "scan"), args)) => {
            let target = args
                .get_one::<String>("target")
                .ok_or(Error::MissingDomain)?;
            let domain = validate_domain(target)?;

            // create filename
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            let filename = format!("{}", timestamp);

            // create output dir
            let output_dir = PathBuf::from(format!("output/domain-recon/{}", domain));

            let save_logs = args.get_flag("logs");
            if save_logs {
                ensure_dir(&output_dir)?;
            }
            init_tracing_subscriber(save_logs, &output_dir, &filename)?;

            let upstream = match args.get_one::<String>("resolver") {
                Some(name) => Upstream::from_name(name)?,
                None => Upstream::System,
            };
            let config = if command == "lookup" {
                ScanConfig::default()
            } else {
                scan_config(args)?
            };

            info!("{} {} (run_{})", command, domain, timestamp);
            let outcome = execute(command, &domain, upstream, &config)?;

            let format = args
                .get_one::<String>("output")
                .map(String::as_str)
                .unwrap_or("json");
            write_outcome(&outcome, format, &output_dir, &filename)?;
        }

        // fallback if a cmd is not handled (should not possible)
        _ => {
            error!("{:12} - Command not handled, exit program", "CLI ERROR");
            return Err(Error::CliUsage("Command not handled".into()));
        }
    }

    Ok(())
}

fn scan_config(args: &ArgMatches) -> Result<ScanConfig> {
    let mut config = ScanConfig::default();

    if let Some(path) = args.get_one::<PathBuf>("wordlist") {
        config.wordlist = load_wordlist(path)?;
    }
    if let Some(batch_size) = args.get_one::<usize>("batch-size") {
        config.batch_size = *batch_size;
    }
    if let Some(timeout_ms) = args.get_one::<u64>("timeout-ms") {
        config.probe_timeout = Duration::from_millis(*timeout_ms);
    }
    if let Some(deadline_ms) = args.get_one::<u64>("deadline-ms") {
        config.deadline = Some(Duration::from_millis(*deadline_ms));
    }
    config.ipv6_fallback = args.get_flag("ipv6-fallback");
    config.ns_analysis = !args.get_flag("no-ns-analysis");

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn execute(command: &str, domain: &str, upstream: Upstream, config: &ScanConfig) -> Result<Outcome> {
    let dns_resolver = new_resolver(upstream)?;

    let outcome = match command {
        "lookup" => Outcome::Lookup(scan::lookup(&dns_resolver, domain).await?),
        "enumerate" => Outcome::Enumerate(scan::enumerate_subdomains(&dns_resolver, domain, config).await?),
        "scan" => Outcome::Scan(scan::scan(&dns_resolver, domain, config).await?),
        other => return Err(Error::CliUsage(format!("Unknown command: {}", other))),
    };
    Ok(outcome)
}

fn write_outcome(outcome: &Outcome, format: &str, output_dir: &Path, filename: &str) -> Result<()> {
    match outcome {
        Outcome::Lookup(report) => write_json(report, format, output_dir, filename),
        Outcome::Enumerate(report) => write_json(report, format, output_dir, filename),
        Outcome::Scan(report) => {
            if format == "both" || format == "json" || format == "stdout" {
                write_json(report, format, output_dir, filename)?;
            }
            if format == "both" || format == "md" {
                ensure_dir(output_dir)?;
                let md_path = output_dir.join(filename).with_extension("md");
                export_to_markdown(report, &md_path)?;
                info!("Markdown report written to {}", md_path.display());
            }
            Ok(())
        }
    }
}

fn write_json<T: Serialize>(report: &T, format: &str, output_dir: &Path, filename: &str) -> Result<()> {
    if format == "stdout" {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    ensure_dir(output_dir)?;
    let json_path = output_dir.join(filename).with_extension("json");
    export_to_json(report, &json_path)?;
    info!("JSON report written to {}", json_path.display());
    Ok(())
}
