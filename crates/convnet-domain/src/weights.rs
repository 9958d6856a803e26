//! Pass 2: experience and edge weights
//!
//! Turns the raw participation counters from pass 1 into per-person experience
//! profiles, then derives node and edge weights from them:
//!
//! ```text
//! conv_weight(p,c) = (supports + 5 * authored) ^ (1/3)
//! total(p)         = Σ_c conv_weight(p,c)
//! avg_year(p)      = Σ_c conv_weight(p,c) * year(c) / total(p)    (default year if total = 0)
//!
//! ratio            = sqrt(total(p)) / sqrt(max(0.001, conv_weight(p,c)))
//! temporal_factor  = 1 + 2 * avg_year(p) / year(c)
//! edge_weight      = ratio * temporal_factor   (× 5 when authored)
//! ```
//!
//! A large total with a small local weight inflates `ratio` on purpose: it marks
//! experience brought in from other conventions.

use crate::assembler::{Assembly, ConventionStat, PersonStats};
use crate::graph::{Node, Relation};
use crate::registry::{ConventionRegistry, DEFAULT_YEAR};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Weight of one authored amendment relative to one supported amendment
pub const AUTHORSHIP_FACTOR: f64 = 5.0;

/// Multiplier applied to `authored` edges
pub const AUTHORED_EDGE_MULTIPLIER: f64 = 5.0;

/// Floor for the local weight in the ratio denominator
pub const MIN_CONVENTION_WEIGHT: f64 = 0.001;

/// Scale of the temporal term
pub const TEMPORAL_SCALE: f64 = 2.0;

/// Person node weight per unit of rounded total experience
pub const PERSON_WEIGHT_SCALE: i64 = 10;

/// Tunable constants for weight computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Weight of authoring relative to supporting in the experience score
    pub authorship_factor: f64,
    /// Multiplier for `authored` edges
    pub authored_edge_multiplier: f64,
    /// Floor for the ratio denominator
    pub min_convention_weight: f64,
    /// Scale of the temporal term
    pub temporal_scale: f64,
    /// Person node weight per unit of experience
    pub person_weight_scale: i64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            authorship_factor: AUTHORSHIP_FACTOR,
            authored_edge_multiplier: AUTHORED_EDGE_MULTIPLIER,
            min_convention_weight: MIN_CONVENTION_WEIGHT,
            temporal_scale: TEMPORAL_SCALE,
            person_weight_scale: PERSON_WEIGHT_SCALE,
        }
    }
}

impl WeightConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.min_convention_weight > 0.0) {
            return Err("min_convention_weight must be greater than 0".to_string());
        }
        if self.authorship_factor < 0.0 || !self.authorship_factor.is_finite() {
            return Err("authorship_factor must be a non-negative number".to_string());
        }
        if !self.authored_edge_multiplier.is_finite() || !self.temporal_scale.is_finite() {
            return Err("edge multipliers must be finite".to_string());
        }
        Ok(())
    }
}

/// A person's experience across conventions
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceProfile {
    /// Convention id → experience weight
    pub per_convention: BTreeMap<String, f64>,
    /// Sum of all convention weights
    pub total: f64,
    /// Experience-weighted mean convention year
    pub avg_year: f64,
}

impl ExperienceProfile {
    /// Profile of a person with no recorded participation
    pub fn empty() -> Self {
        Self {
            per_convention: BTreeMap::new(),
            total: 0.0,
            avg_year: DEFAULT_YEAR,
        }
    }

    /// Experience weight in one convention (0 when absent)
    pub fn convention_weight(&self, convention: &str) -> f64 {
        self.per_convention.get(convention).copied().unwrap_or(0.0)
    }
}

/// Computes profiles, node weights and edge weights
pub struct WeightEngine<'a> {
    registry: &'a ConventionRegistry,
    config: WeightConfig,
}

impl<'a> WeightEngine<'a> {
    /// Create an engine over a registry
    pub fn new(registry: &'a ConventionRegistry, config: WeightConfig) -> Self {
        Self { registry, config }
    }

    /// Experience weight for one convention: cube root of the blended count
    pub fn convention_weight(&self, stat: ConventionStat) -> f64 {
        (f64::from(stat.supports) + self.config.authorship_factor * f64::from(stat.authored)).cbrt()
    }

    /// Build a person's profile from their per-convention counters
    pub fn profile(&self, stats: &BTreeMap<String, ConventionStat>) -> ExperienceProfile {
        let per_convention: BTreeMap<String, f64> = stats
            .iter()
            .map(|(convention, stat)| (convention.clone(), self.convention_weight(*stat)))
            .collect();

        let total: f64 = per_convention.values().sum();
        let avg_year = if total > 0.0 {
            per_convention
                .iter()
                .map(|(convention, weight)| weight * self.registry.year(convention))
                .sum::<f64>()
                / total
        } else {
            // Fixed policy year, independent of the registry's fallback
            DEFAULT_YEAR
        };

        ExperienceProfile {
            per_convention,
            total,
            avg_year,
        }
    }

    /// Profiles for every person, computed in parallel
    pub fn profiles(&self, stats: &PersonStats) -> HashMap<String, ExperienceProfile> {
        stats
            .par_iter()
            .map(|(person, per_convention)| (person.clone(), self.profile(per_convention)))
            .collect()
    }

    /// Final weight of an edge from a person in a convention
    pub fn edge_weight(&self, profile: &ExperienceProfile, convention: &str, relation: Relation) -> f64 {
        let local = profile
            .convention_weight(convention)
            .max(self.config.min_convention_weight);
        let ratio = profile.total.sqrt() / local.sqrt();
        let temporal_factor =
            1.0 + self.config.temporal_scale * (profile.avg_year / self.registry.year(convention));

        let weight = ratio * temporal_factor;
        match relation {
            Relation::Authored => weight * self.config.authored_edge_multiplier,
            Relation::Supports => weight,
        }
    }

    /// Person node weight: scale × total experience rounded half-to-even
    pub fn person_weight(&self, total: f64) -> i64 {
        total.round_ties_even() as i64 * self.config.person_weight_scale
    }

    /// Write node and edge weights into an assembly
    ///
    /// Must only run after pass 1 has seen every record. Returns the profiles so
    /// callers can report on them.
    pub fn apply(&self, assembly: &mut Assembly) -> HashMap<String, ExperienceProfile> {
        let profiles = self.profiles(&assembly.person_stats);
        let empty = ExperienceProfile::empty();

        for node in &mut assembly.nodes {
            match node {
                Node::Amendment(amendment) => {
                    amendment.weight = assembly
                        .supporter_counts
                        .get(&amendment.id)
                        .copied()
                        .unwrap_or(0);
                }
                Node::Person(person) => {
                    let total = profiles.get(&person.id).map_or(0.0, |p| p.total);
                    person.weight = self.person_weight(total);
                }
            }
        }

        assembly.edges.par_iter_mut().for_each(|edge| {
            let profile = profiles.get(&edge.source).unwrap_or(&empty);
            edge.weight = self.edge_weight(profile, &edge.convention, edge.relation);
        });

        info!(
            profiles = profiles.len(),
            edges = assembly.edges.len(),
            "weight pass complete"
        );
        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn stats(entries: &[(&str, u32, u32)]) -> BTreeMap<String, ConventionStat> {
        entries
            .iter()
            .map(|(c, supports, authored)| {
                (
                    c.to_string(),
                    ConventionStat {
                        supports: *supports,
                        authored: *authored,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_convention_weight() {
        let registry = ConventionRegistry::default();
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        assert_eq!(engine.convention_weight(ConventionStat::default()), 0.0);
        assert!((engine.convention_weight(ConventionStat { supports: 8, authored: 0 }) - 2.0).abs() < EPS);
        assert!((engine.convention_weight(ConventionStat { supports: 0, authored: 1 }) - 1.709_975_946_676_697).abs() < EPS);
        // 2 + 5*5 = 27
        assert!((engine.convention_weight(ConventionStat { supports: 2, authored: 5 }) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_profile_single_convention() {
        let registry = ConventionRegistry::default();
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        let profile = engine.profile(&stats(&[("51bdk", 0, 1)]));
        assert!((profile.total - 5f64.cbrt()).abs() < EPS);
        assert!((profile.avg_year - 2018.89).abs() < 1e-6);
    }

    #[test]
    fn test_profile_weighted_year() {
        let registry = ConventionRegistry::empty()
            .with_year("a", 2010.0)
            .with_year("b", 2020.0);
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        // weights 1 (a) and 3 (b): (2010 + 3 * 2020) / 4 = 2017.5
        let profile = engine.profile(&stats(&[("a", 1, 0), ("b", 27, 0)]));
        assert!((profile.total - 4.0).abs() < EPS);
        assert!((profile.avg_year - 2017.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_total_falls_back_to_default_year() {
        let registry = ConventionRegistry::default();
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        let profile = engine.profile(&stats(&[("51bdk", 0, 0)]));
        assert_eq!(profile.total, 0.0);
        assert_eq!(profile.avg_year, 2020.0);
        assert!(!profile.avg_year.is_nan());
    }

    #[test]
    fn test_zero_total_year_ignores_registry_fallback() {
        let mut registry = ConventionRegistry::default();
        registry.default_year = 2005.0;
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        let profile = engine.profile(&stats(&[("LDK24-2", 0, 0)]));
        assert_eq!(profile.avg_year, DEFAULT_YEAR);
        assert_eq!(ExperienceProfile::empty().avg_year, 2020.0);

        // Unknown conventions still follow the configured fallback
        let profile = engine.profile(&stats(&[("LDK24-2", 1, 0)]));
        assert!((profile.avg_year - 2005.0).abs() < EPS);
    }

    #[test]
    fn test_unknown_convention_uses_default_year() {
        let registry = ConventionRegistry::default();
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        let profile = engine.profile(&stats(&[("LDK24-2", 1, 0)]));
        assert!((profile.avg_year - 2020.0).abs() < EPS);
        let weight = engine.edge_weight(&profile, "LDK24-2", Relation::Supports);
        assert!((weight - 3.0).abs() < EPS);
    }

    #[test]
    fn test_authored_edge_example() {
        let registry = ConventionRegistry::default();
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        let profile = engine.profile(&stats(&[("51bdk", 0, 1)]));
        let weight = engine.edge_weight(&profile, "51bdk", Relation::Authored);
        assert!((weight - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_local_weight_is_guarded() {
        let registry = ConventionRegistry::default();
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        let profile = engine.profile(&stats(&[("51bdk", 8, 0), ("50bdk", 0, 0)]));
        let weight = engine.edge_weight(&profile, "50bdk", Relation::Supports);
        assert!(weight.is_finite());
        // sqrt(2) / sqrt(0.001) dominates
        assert!(weight > 40.0);
    }

    #[test]
    fn test_outside_experience_inflates_ratio() {
        let registry = ConventionRegistry::empty()
            .with_year("old", 2019.0)
            .with_year("new", 2024.0);
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        let veteran = engine.profile(&stats(&[("old", 27, 0), ("new", 1, 0)]));
        let newcomer = engine.profile(&stats(&[("new", 1, 0)]));

        let veteran_weight = engine.edge_weight(&veteran, "new", Relation::Supports);
        let newcomer_weight = engine.edge_weight(&newcomer, "new", Relation::Supports);
        assert!(veteran_weight > newcomer_weight);
    }

    #[test]
    fn test_person_weight_rounding() {
        let registry = ConventionRegistry::default();
        let engine = WeightEngine::new(&registry, WeightConfig::default());

        assert_eq!(engine.person_weight(0.0), 0);
        assert_eq!(engine.person_weight(1.71), 20);
        assert_eq!(engine.person_weight(2.5), 20);
        assert_eq!(engine.person_weight(3.5), 40);
        assert_eq!(engine.person_weight(3.49), 30);
    }

    #[test]
    fn test_config_validation() {
        assert!(WeightConfig::default().validate().is_ok());

        let config = WeightConfig {
            min_convention_weight: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = WeightConfig {
            authorship_factor: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_stats() -> impl Strategy<Value = BTreeMap<String, ConventionStat>> {
        prop::collection::btree_map(
            prop::sample::select(vec!["49bdk", "50bdk", "51bdk", "LDK23-1", "LA25-3"])
                .prop_map(str::to_string),
            (0u32..40, 0u32..10).prop_map(|(supports, authored)| ConventionStat { supports, authored }),
            1..5,
        )
    }

    fn registry() -> ConventionRegistry {
        ConventionRegistry::default()
            .with_year("49bdk", 2023.9)
            .with_year("50bdk", 2024.9)
            .with_year("LDK23-1", 2023.2)
    }

    proptest! {
        /// Property: total experience is exactly the sum of convention weights
        #[test]
        fn test_total_is_sum_of_conventions(stats in arb_stats()) {
            let registry = registry();
            let engine = WeightEngine::new(&registry, WeightConfig::default());
            let profile = engine.profile(&stats);

            let sum: f64 = profile.per_convention.values().sum();
            prop_assert!((profile.total - sum).abs() < 1e-12);
        }

        /// Property: the mean year lies within the span of participated years
        #[test]
        fn test_avg_year_within_span(stats in arb_stats()) {
            let registry = registry();
            let engine = WeightEngine::new(&registry, WeightConfig::default());
            let profile = engine.profile(&stats);

            if profile.total > 0.0 {
                let years: Vec<f64> = stats
                    .iter()
                    .filter(|(_, s)| s.supports + s.authored > 0)
                    .map(|(c, _)| registry.year(c))
                    .collect();
                let min = years.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = years.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(profile.avg_year >= min - 1e-6 && profile.avg_year <= max + 1e-6);
            } else {
                prop_assert_eq!(profile.avg_year, 2020.0);
            }
        }

        /// Property: edge weights are finite and positive for participated conventions
        #[test]
        fn test_edge_weights_finite(stats in arb_stats()) {
            let registry = registry();
            let engine = WeightEngine::new(&registry, WeightConfig::default());
            let profile = engine.profile(&stats);

            for convention in stats.keys() {
                for relation in [Relation::Authored, Relation::Supports] {
                    let weight = engine.edge_weight(&profile, convention, relation);
                    prop_assert!(weight.is_finite());
                    prop_assert!(weight >= 0.0);
                }
            }
        }

        /// Property: authored edges weigh exactly five times supports edges
        #[test]
        fn test_authored_multiplier(stats in arb_stats()) {
            let registry = registry();
            let engine = WeightEngine::new(&registry, WeightConfig::default());
            let profile = engine.profile(&stats);

            for convention in stats.keys() {
                let authored = engine.edge_weight(&profile, convention, Relation::Authored);
                let supports = engine.edge_weight(&profile, convention, Relation::Supports);
                prop_assert!((authored - 5.0 * supports).abs() <= 1e-9 * authored.abs().max(1.0));
            }
        }
    }
}
