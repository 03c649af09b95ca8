use std::env;
use std::path::PathBuf;

use jeevanamrit_intake::session::DEFAULT_REDIRECT;

/// Where profiles are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    S3,
    Memory,
}

/// Service settings, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub store: StoreBackend,
    pub bucket: String,
    /// Overrides the default AWS region resolution when set.
    pub region: Option<String>,
    /// JSON question bank to use for intake instead of the built-in one.
    pub question_bank: Option<PathBuf>,
    pub redirect_to: String,
}

impl ServiceConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let store = match lookup("JEEVANAMRIT_STORE").as_deref() {
            None | Some("s3") => StoreBackend::S3,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(eyre::eyre!(
                    "JEEVANAMRIT_STORE must be 's3' or 'memory', got '{other}'"
                ));
            }
        };

        Ok(Self {
            store,
            bucket: lookup("JEEVANAMRIT_BUCKET").unwrap_or_else(|| "jeevanamrit".to_string()),
            region: lookup("AWS_REGION").filter(|r| !r.is_empty()),
            question_bank: lookup("JEEVANAMRIT_QUESTION_BANK")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            redirect_to: lookup("JEEVANAMRIT_REDIRECT")
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REDIRECT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> eyre::Result<ServiceConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_s3_and_dashboard_redirect() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.store, StoreBackend::S3);
        assert_eq!(config.bucket, "jeevanamrit");
        assert_eq!(config.region, None);
        assert_eq!(config.question_bank, None);
        assert_eq!(config.redirect_to, "/patient-dashboard");
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("JEEVANAMRIT_STORE", "memory"),
            ("JEEVANAMRIT_BUCKET", "clinic-a"),
            ("AWS_REGION", "ap-south-1"),
            ("JEEVANAMRIT_QUESTION_BANK", "/etc/jeevanamrit/bank.json"),
            ("JEEVANAMRIT_REDIRECT", "/welcome"),
        ])
        .unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.bucket, "clinic-a");
        assert_eq!(config.region.as_deref(), Some("ap-south-1"));
        assert_eq!(
            config.question_bank,
            Some(PathBuf::from("/etc/jeevanamrit/bank.json"))
        );
        assert_eq!(config.redirect_to, "/welcome");
    }

    #[test]
    fn rejects_unknown_store() {
        let err = config_from(&[("JEEVANAMRIT_STORE", "postgres")]).unwrap_err();
        assert!(err.to_string().contains("postgres"));
    }
}
