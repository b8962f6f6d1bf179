use crate::error::{Error, Result};

/// Default ad pattern vocabulary, strict variants first.
/// Matched case-insensitively as substrings of `entryId`.
pub const DEFAULT_AD_PATTERNS: &[&str] = &[
    "promoted-tweet",
    "promoted_tweet",
    "promotedtweet",
    "promoted",
    "advert",
    "sponsor",
];

/// How flagged entries are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Drop ad entries from their parent array
    Remove,
    /// Replace ad entries with a minimal placeholder, never changing array length
    Neutralize,
}

impl From<&str> for Strategy {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "neutralize" => Strategy::Neutralize,
            _ => Strategy::Remove, // Default fallback
        }
    }
}

/// Whether a bare card field counts as an ad marker outside thread views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPolicy {
    Strict,
    Lenient,
}

impl From<&str> for CardPolicy {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "lenient" => CardPolicy::Lenient,
            _ => CardPolicy::Strict, // Default fallback
        }
    }
}

/// Configuration for the scrub engine
#[derive(Debug, Clone)]
pub struct Config {
    pub strategy: Strategy,
    pub card_policy: CardPolicy,
    /// Ordered pattern table, evaluated left-to-right with short-circuit
    pub ad_patterns: Vec<String>,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            strategy: Strategy::Remove,
            card_policy: CardPolicy::Strict,
            ad_patterns: DEFAULT_AD_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ad_patterns.is_empty() {
            return Err(Error::Config(
                "ad pattern table must not be empty".to_string(),
            ));
        }

        if let Some(blank) = self.ad_patterns.iter().find(|p| p.trim().is_empty()) {
            return Err(Error::Config(format!(
                "blank ad pattern in table: {:?}",
                blank
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    /// Set the filtering strategy
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set strategy from string
    pub fn strategy_str(mut self, strategy: &str) -> Self {
        self.config.strategy = Strategy::from(strategy);
        self
    }

    /// Set the card policy
    pub fn card_policy(mut self, policy: CardPolicy) -> Self {
        self.config.card_policy = policy;
        self
    }

    /// Set card policy from string
    pub fn card_policy_str(mut self, policy: &str) -> Self {
        self.config.card_policy = CardPolicy::from(policy);
        self
    }

    /// Append a pattern to the ad table
    pub fn add_ad_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.ad_patterns.push(pattern.into());
        self
    }

    /// Replace the ad pattern table entirely
    pub fn ad_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.ad_patterns = patterns;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
