use crate::validate::is_valid_label;
use crate::wordlist::DEFAULT_WORDLIST;
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

// region:        --- Constants

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2000;

// endregion:     --- Constants

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Candidates probed concurrently; the next batch starts once all have settled.
    pub batch_size: usize,
    /// Per-query ceiling; an expired query counts as not found.
    pub probe_timeout: Duration,
    /// Once elapsed, remaining batches are skipped.
    pub deadline: Option<Duration>,
    /// Query AAAA for candidates that have no A record.
    pub ipv6_fallback: bool,
    pub ns_analysis: bool,
    pub wordlist: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            deadline: None,
            ipv6_fallback: false,
            ns_analysis: true,
            wordlist: DEFAULT_WORDLIST.iter().map(|label| label.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch size must be at least 1".into()));
        }
        if self.probe_timeout.is_zero() {
            return Err(Error::Config("probe timeout must be greater than zero".into()));
        }
        if self.wordlist.is_empty() {
            return Err(Error::Config("wordlist is empty".into()));
        }
        Ok(())
    }

    pub fn with_wordlist<I, S>(mut self, wordlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wordlist = wordlist.into_iter().map(Into::into).collect();
        self
    }
}

/// Reads one label per line. Blank lines and `#` comments are ignored.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let wordlist = parse_wordlist(&content);
    debug!("{} labels loaded from {}", wordlist.len(), path.display());
    Ok(wordlist)
}

pub fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let label = line.to_ascii_lowercase();
            if is_valid_label(&label) {
                Some(label)
            } else {
                warn!("Skipping invalid wordlist entry: {:?}", line);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.probe_timeout, Duration::from_millis(2000));
        assert!(config.ns_analysis);
        assert!(!config.ipv6_fallback);
    }

    #[test]
    fn rejects_unusable_settings() {
        let zero_batch = ScanConfig {
            batch_size: 0,
            ..ScanConfig::default()
        };
        assert!(matches!(zero_batch.validate(), Err(Error::Config(_))));

        let zero_timeout = ScanConfig {
            probe_timeout: Duration::ZERO,
            ..ScanConfig::default()
        };
        assert!(matches!(zero_timeout.validate(), Err(Error::Config(_))));

        let empty = ScanConfig::default().with_wordlist(Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn parses_wordlist_lines() {
        let wordlist = parse_wordlist("# common\nwww\n\n  Mail \nbad_label\napi-v1\n");
        assert_eq!(wordlist, vec!["www", "mail", "api-v1"]);
    }

    #[test]
    fn loads_wordlist_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ftp\nwww").unwrap();

        let wordlist = load_wordlist(file.path()).unwrap();
        assert_eq!(wordlist, vec!["ftp", "www"]);
        assert!(load_wordlist(Path::new("/nonexistent/wordlist.txt")).is_err());
    }
}
