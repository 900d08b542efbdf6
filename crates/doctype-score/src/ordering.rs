//! Ordering signal: logical flow, required-section order, and templates.

use doctype_model::{Signal, TypeDefinition};

use crate::config::ScoringConfig;
use crate::lexicon::{SectionRole, section_role, section_templates};
use crate::profile::DocumentProfile;
use crate::signal::{ScoreFactor, SignalScore, SignalScorer, ratio_or};

/// Required-order score when fewer than two required sections are located.
const NEUTRAL_ORDER: f64 = 0.5;

/// Bucket score when no expected section could be matched.
const NO_BUCKET_MATCHES: f64 = 0.2;

/// Scores whether sections appear in the order a type expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderingScorer;

/// Relative position of `index` within a list of `len` items.
fn relative(index: usize, len: usize) -> f64 {
    if len <= 1 {
        0.0
    } else {
        index as f64 / (len - 1) as f64
    }
}

/// Early / middle / late bucket of a position.
fn bucket(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index * 3 / len).min(2)
    }
}

impl OrderingScorer {
    /// Logical flow from introduction to analysis to conclusion.
    fn flow(profile: &DocumentProfile<'_>) -> (f64, usize) {
        let mut intro = None;
        let mut analysis = None;
        let mut conclusion = None;
        for (index, title) in profile.section_titles().iter().enumerate() {
            let slot = match section_role(title) {
                Some(SectionRole::Introduction) => &mut intro,
                Some(SectionRole::Analysis) => &mut analysis,
                Some(SectionRole::Conclusion) => &mut conclusion,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(index);
            }
        }

        let present = [intro, analysis, conclusion]
            .iter()
            .filter(|p| p.is_some())
            .count();
        let pairs = [(intro, analysis), (analysis, conclusion), (intro, conclusion)];
        let mut comparable = 0;
        let mut ordered = 0;
        for (first, second) in pairs {
            if let (Some(a), Some(b)) = (first, second) {
                comparable += 1;
                if a < b {
                    ordered += 1;
                }
            }
        }

        let presence = 0.5 * present as f64 / 3.0;
        let order = if comparable > 0 {
            0.5 * ordered as f64 / comparable as f64
        } else if present > 0 {
            0.5 * 0.5
        } else {
            0.0
        };
        (presence + order, present)
    }

    /// Fraction of adjacent located required sections that appear in order.
    fn required_order(
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        similarity: f64,
    ) -> (f64, usize) {
        let positions: Vec<usize> = definition
            .required_sections
            .iter()
            .filter_map(|name| profile.find_section(name, similarity))
            .collect();
        if positions.len() < 2 {
            return (NEUTRAL_ORDER, positions.len());
        }
        let in_order = positions.windows(2).filter(|w| w[0] <= w[1]).count();
        (ratio_or(in_order, positions.len() - 1, NEUTRAL_ORDER), positions.len())
    }

    /// Best position-weighted overlap with a category template, or the
    /// early/middle/late bucket fraction when the category has no templates.
    fn template(
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        similarity: f64,
    ) -> (f64, &'static str) {
        let templates = section_templates(definition.category);
        let n = profile.section_count();
        if !templates.is_empty() {
            let best = templates
                .iter()
                .map(|template| {
                    let m = template.len();
                    let total: f64 = template
                        .iter()
                        .enumerate()
                        .filter_map(|(i, name)| {
                            profile
                                .find_section(name, similarity)
                                .map(|j| 1.0 - (relative(i, m) - relative(j, n)).abs())
                        })
                        .sum();
                    total / m as f64
                })
                .fold(0.0, f64::max);
            return (best, "Category template overlap");
        }

        let expected: Vec<&str> = definition.all_sections().collect();
        let k = expected.len();
        let mut matched = 0;
        let mut in_bucket = 0;
        for (i, name) in expected.iter().enumerate() {
            if let Some(j) = profile.find_section(name, similarity) {
                matched += 1;
                if bucket(i, k) == bucket(j, n) {
                    in_bucket += 1;
                }
            }
        }
        (
            ratio_or(in_bucket, matched, NO_BUCKET_MATCHES),
            "Expected early/middle/late placement",
        )
    }
}

impl SignalScorer for OrderingScorer {
    fn signal(&self) -> Signal {
        Signal::Ordering
    }

    fn score(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        config: &ScoringConfig,
    ) -> SignalScore {
        let similarity = config.thresholds.section_similarity;
        let (flow, roles) = Self::flow(profile);
        let (required, located) = Self::required_order(profile, definition, similarity);
        let (template, template_note) = Self::template(profile, definition, similarity);

        let value = 0.4 * flow + 0.35 * required + 0.25 * template;
        let mut score = SignalScore::new(Signal::Ordering, value)
            .with_factor(ScoreFactor::new(
                "Logical flow",
                flow,
                format!("{roles} of 3 flow roles present"),
            ))
            .with_factor(ScoreFactor::new(
                "Required order",
                required,
                format!("{located} required sections located"),
            ))
            .with_factor(ScoreFactor::new("Template", template, template_note));

        if located >= 2 && required >= 1.0 {
            score = score.with_reason(format!(
                "Required sections follow the {} order",
                definition.name
            ));
        } else if located >= 2 && required < 0.5 {
            score = score.with_reason("Required sections appear out of order");
        }
        if profile.section_count() == 0 {
            score = score.with_reason("Document has no sections to order");
        }
        score
    }
}
