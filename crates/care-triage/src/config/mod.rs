use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub policy: TriagePolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            policy: TriagePolicy::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Score cut-offs separating the discrete risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub moderate: f64,
    pub high: f64,
    pub critical: f64,
}

impl RiskThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |value: f64| value.is_finite() && value > 0.0 && value <= 100.0;
        if !(in_range(self.moderate) && in_range(self.high) && in_range(self.critical)) {
            return Err(ConfigError::ThresholdOrder(*self));
        }
        if !(self.moderate < self.high && self.high < self.critical) {
            return Err(ConfigError::ThresholdOrder(*self));
        }
        Ok(())
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            moderate: 40.0,
            high: 60.0,
            critical: 80.0,
        }
    }
}

/// Free-text trigger words associated with one provider specialty tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyKeywords {
    pub specialty: String,
    pub keywords: Vec<String>,
}

impl SpecialtyKeywords {
    fn new(specialty: &str, keywords: &[&str]) -> Self {
        Self {
            specialty: specialty.to_string(),
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        }
    }
}

/// Clinical policy dials shared by the triage engines.
///
/// The specialty table is ordered: the first entry that matches a concern wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriagePolicy {
    pub thresholds: RiskThresholds,
    pub crisis_keywords: Vec<String>,
    pub specialty_keywords: Vec<SpecialtyKeywords>,
}

impl Default for TriagePolicy {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            crisis_keywords: [
                "suicide",
                "suicidal",
                "kill myself",
                "end my life",
                "self-harm",
                "hurt myself",
                "cut myself",
                "no reason to live",
                "better off dead",
                "worthless",
                "hopeless",
            ]
            .iter()
            .map(|keyword| keyword.to_string())
            .collect(),
            specialty_keywords: vec![
                SpecialtyKeywords::new(
                    "anxiety",
                    &["anxiety", "anxious", "panic", "worry", "fear", "phobia"],
                ),
                SpecialtyKeywords::new(
                    "depression",
                    &["depression", "depressed", "sad", "hopeless", "suicide"],
                ),
                SpecialtyKeywords::new(
                    "trauma",
                    &["trauma", "ptsd", "abuse", "assault", "violence"],
                ),
                SpecialtyKeywords::new(
                    "addiction",
                    &["addiction", "substance", "alcohol", "drug", "drinking"],
                ),
                SpecialtyKeywords::new(
                    "couples",
                    &["relationship", "marriage", "partner", "couples"],
                ),
                SpecialtyKeywords::new(
                    "eating-disorders",
                    &["eating", "anorexia", "bulimia", "binge"],
                ),
                SpecialtyKeywords::new("child", &["child", "teen", "adolescent", "young"]),
                SpecialtyKeywords::new(
                    "family",
                    &["family", "parent", "child", "sibling"],
                ),
            ],
        }
    }
}

impl TriagePolicy {
    /// Resolve the policy from `TRIAGE_POLICY_FILE`, then apply individual env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut policy = match env::var("TRIAGE_POLICY_FILE") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(PathBuf::from(path))?,
            _ => Self::default(),
        };

        if let Some(value) = threshold_var("TRIAGE_MODERATE_THRESHOLD")? {
            policy.thresholds.moderate = value;
        }
        if let Some(value) = threshold_var("TRIAGE_HIGH_THRESHOLD")? {
            policy.thresholds.high = value;
        }
        if let Some(value) = threshold_var("TRIAGE_CRITICAL_THRESHOLD")? {
            policy.thresholds.critical = value;
        }

        if let Ok(raw) = env::var("TRIAGE_CRISIS_KEYWORDS") {
            let keywords: Vec<String> = raw
                .split(',')
                .map(|keyword| keyword.trim().to_string())
                .filter(|keyword| !keyword.is_empty())
                .collect();
            if !keywords.is_empty() {
                policy.crisis_keywords = keywords;
            }
        }

        policy.thresholds.validate()?;
        Ok(policy)
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::PolicyFile {
            path: path.clone(),
            source,
        })?;
        let policy: TriagePolicy = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::PolicyFormat { path, source })?;
        policy.thresholds.validate()?;
        Ok(policy)
    }
}

fn threshold_var(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidThreshold { name, value: raw }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidThreshold {
        name: &'static str,
        value: String,
    },
    ThresholdOrder(RiskThresholds),
    PolicyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    PolicyFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{name} must be a number, found '{value}'")
            }
            ConfigError::ThresholdOrder(thresholds) => write!(
                f,
                "risk thresholds must ascend within (0, 100] (moderate {}, high {}, critical {})",
                thresholds.moderate, thresholds.high, thresholds.critical
            ),
            ConfigError::PolicyFile { path, .. } => {
                write!(f, "unable to read triage policy file {}", path.display())
            }
            ConfigError::PolicyFormat { path, .. } => {
                write!(f, "triage policy file {} is not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold { .. }
            | ConfigError::ThresholdOrder(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::PolicyFile { source, .. } => Some(source),
            ConfigError::PolicyFormat { source, .. } => Some(source),
        }
    }
}
