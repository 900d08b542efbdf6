//! Engine configuration.
//!
//! Every struct implements `Default` with the documented values and uses
//! `#[serde(default)]`, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! enable_refinement = true
//!
//! [ambiguity]
//! ambiguity_threshold = 0.25
//!
//! [scoring.weights]
//! structure = 0.35
//! ```

use serde::{Deserialize, Serialize};

use doctype_score::ScoringConfig;

/// Thresholds for the confidence/ambiguity policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbiguityConfig {
    /// Margin above which the top choice is unambiguous (default: 0.2).
    pub ambiguity_threshold: f64,
    /// Confidence below which a result is always very ambiguous (default: 0.7).
    pub confidence_threshold: f64,
}

impl Default for AmbiguityConfig {
    fn default() -> Self {
        Self {
            ambiguity_threshold: 0.2,
            confidence_threshold: 0.7,
        }
    }
}

impl AmbiguityConfig {
    /// Demands a wider margin and more confidence before trusting a result.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ambiguity_threshold: 0.3,
            confidence_threshold: 0.8,
        }
    }

    /// Accepts narrower margins, for exploratory use.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            ambiguity_threshold: 0.1,
            confidence_threshold: 0.6,
        }
    }
}

/// Weights of the consistency re-ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Weight of the composite score (default: 0.6).
    pub score_weight: f64,
    /// Weight of the sub-score agreement term (default: 0.2).
    pub confidence_weight: f64,
    /// Weight of the match/no-match consistency term (default: 0.15).
    pub consistency_weight: f64,
    /// Weight of the ambiguity penalty (default: 0.05).
    pub penalty_weight: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            score_weight: 0.6,
            confidence_weight: 0.2,
            consistency_weight: 0.15,
            penalty_weight: 0.05,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub ambiguity: AmbiguityConfig,
    pub ranker: RankerConfig,
    /// Run the consistency re-ranking pass (default: false).
    pub enable_refinement: bool,
    /// Score types on the rayon pool (default: true).
    pub parallel_scoring: bool,
    /// Use the built-in catalog when the registry is missing or fails (default: false).
    pub use_builtin_fallback: bool,
    /// Maximum number of results kept in the in-memory cache (default: 256).
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            ambiguity: AmbiguityConfig::default(),
            ranker: RankerConfig::default(),
            enable_refinement: false,
            parallel_scoring: true,
            use_builtin_fallback: false,
            cache_capacity: 256,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn with_ambiguity(mut self, ambiguity: AmbiguityConfig) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    #[must_use]
    pub fn with_ranker(mut self, ranker: RankerConfig) -> Self {
        self.ranker = ranker;
        self
    }

    #[must_use]
    pub fn with_refinement(mut self, enabled: bool) -> Self {
        self.enable_refinement = enabled;
        self
    }

    #[must_use]
    pub fn with_parallel_scoring(mut self, enabled: bool) -> Self {
        self.parallel_scoring = enabled;
        self
    }

    #[must_use]
    pub fn with_builtin_fallback(mut self, enabled: bool) -> Self {
        self.use_builtin_fallback = enabled;
        self
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_order_thresholds() {
        let strict = AmbiguityConfig::strict();
        let default = AmbiguityConfig::default();
        let relaxed = AmbiguityConfig::relaxed();
        assert!(strict.ambiguity_threshold > default.ambiguity_threshold);
        assert!(relaxed.ambiguity_threshold < default.ambiguity_threshold);
        assert!(strict.confidence_threshold > relaxed.confidence_threshold);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: EngineConfig = toml::from_str(
            r#"
            enable_refinement = true

            [ambiguity]
            ambiguity_threshold = 0.25

            [scoring.weights]
            structure = 0.35
            "#,
        )
        .expect("parse engine config");
        assert!(config.enable_refinement);
        assert!(config.parallel_scoring);
        assert_eq!(config.ambiguity.ambiguity_threshold, 0.25);
        assert_eq!(config.ambiguity.confidence_threshold, 0.7);
        assert_eq!(config.scoring.weights.structure, 0.35);
        assert_eq!(config.scoring.weights.terminology, 0.25);
        assert_eq!(config.ranker, RankerConfig::default());
        assert_eq!(config.cache_capacity, 256);
    }

    #[test]
    fn empty_toml_is_default() {
        let config: EngineConfig = toml::from_str("").expect("parse");
        assert_eq!(config, EngineConfig::default());
    }
}
