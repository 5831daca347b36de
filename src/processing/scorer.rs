//! Compatibility scoring and categorical evaluations

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score returned when the job description names no known skills.
pub const NEUTRAL_SCORE: u8 = 75;

/// Default half-width of the random perturbation applied to scores.
pub const DEFAULT_JITTER_SPREAD: f64 = 5.0;

/// Largest meaningful perturbation; anything wider only saturates the 0-100 clamp.
pub const MAX_JITTER_SPREAD: f64 = 100.0;

/// Inclusive lower bounds of the top three score buckets.
const STRONG_THRESHOLD: u32 = 90;
const GOOD_THRESHOLD: u32 = 75;
const MODERATE_THRESHOLD: u32 = 60;

/// Source of the score perturbation.
///
/// Implementations return an offset in `[-spread, spread]`.
pub trait Jitter {
    fn offset(&mut self, spread: f64) -> f64;
}

/// Uniformly distributed perturbation drawn from any random generator
pub struct RandomJitter<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomJitter<StdRng> {
    /// Reproducible perturbation sequence
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

/// Bring an arbitrary spread into `[0, MAX_JITTER_SPREAD]`, mapping NaN to zero
pub fn bounded_spread(spread: f64) -> f64 {
    if spread.is_nan() {
        0.0
    } else {
        spread.clamp(0.0, MAX_JITTER_SPREAD)
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn offset(&mut self, spread: f64) -> f64 {
        let spread = bounded_spread(spread);
        if spread == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-spread..=spread)
    }
}

/// Constant perturbation, clamped to the requested spread
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn offset(&mut self, spread: f64) -> f64 {
        let spread = spread.max(0.0);
        self.0.clamp(-spread, spread)
    }
}

/// Compute a 0-100 compatibility score from matched and required skill counts.
///
/// With no required skills the neutral score is returned untouched. Otherwise the
/// match ratio is perturbed by `jitter`, clamped, and rounded.
pub fn calculate_score<J: Jitter + ?Sized>(
    matched: usize,
    required: usize,
    spread: f64,
    jitter: &mut J,
) -> u8 {
    if required == 0 {
        return NEUTRAL_SCORE;
    }

    let base = matched as f64 / required as f64 * 100.0;
    let perturbed = base + jitter.offset(spread);
    perturbed.clamp(0.0, 100.0).round() as u8
}

/// The four buckets shared by every categorical evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Good,
    Moderate,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        if score >= STRONG_THRESHOLD {
            ScoreBand::Strong
        } else if score >= GOOD_THRESHOLD {
            ScoreBand::Good
        } else if score >= MODERATE_THRESHOLD {
            ScoreBand::Moderate
        } else {
            ScoreBand::Low
        }
    }

    /// Gauge colour used by the renderers
    pub fn hex_color(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "#10B981",
            ScoreBand::Good => "#2563EB",
            ScoreBand::Moderate => "#F59E0B",
            ScoreBand::Low => "#EF4444",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "score-strong",
            ScoreBand::Good => "score-good",
            ScoreBand::Moderate => "score-moderate",
            ScoreBand::Low => "score-low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    #[serde(rename = "Strong match")]
    StrongMatch,
    #[serde(rename = "Good match")]
    GoodMatch,
    #[serde(rename = "Moderate match")]
    ModerateMatch,
    #[serde(rename = "Low match")]
    LowMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceEvaluation {
    #[serde(rename = "Highly Relevant")]
    HighlyRelevant,
    #[serde(rename = "Relevant")]
    Relevant,
    #[serde(rename = "Partially Relevant")]
    PartiallyRelevant,
    #[serde(rename = "Not Relevant")]
    NotRelevant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationEvaluation {
    #[serde(rename = "Exceeds Requirements")]
    ExceedsRequirements,
    #[serde(rename = "Meets Requirements")]
    MeetsRequirements,
    #[serde(rename = "Partially Meets")]
    PartiallyMeets,
    #[serde(rename = "Does Not Meet")]
    DoesNotMeet,
}

impl ScoreCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::StrongMatch => "Strong match",
            ScoreCategory::GoodMatch => "Good match",
            ScoreCategory::ModerateMatch => "Moderate match",
            ScoreCategory::LowMatch => "Low match",
        }
    }

    pub fn band(&self) -> ScoreBand {
        match self {
            ScoreCategory::StrongMatch => ScoreBand::Strong,
            ScoreCategory::GoodMatch => ScoreBand::Good,
            ScoreCategory::ModerateMatch => ScoreBand::Moderate,
            ScoreCategory::LowMatch => ScoreBand::Low,
        }
    }
}

impl ExperienceEvaluation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceEvaluation::HighlyRelevant => "Highly Relevant",
            ExperienceEvaluation::Relevant => "Relevant",
            ExperienceEvaluation::PartiallyRelevant => "Partially Relevant",
            ExperienceEvaluation::NotRelevant => "Not Relevant",
        }
    }

    pub fn band(&self) -> ScoreBand {
        match self {
            ExperienceEvaluation::HighlyRelevant => ScoreBand::Strong,
            ExperienceEvaluation::Relevant => ScoreBand::Good,
            ExperienceEvaluation::PartiallyRelevant => ScoreBand::Moderate,
            ExperienceEvaluation::NotRelevant => ScoreBand::Low,
        }
    }
}

impl EducationEvaluation {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationEvaluation::ExceedsRequirements => "Exceeds Requirements",
            EducationEvaluation::MeetsRequirements => "Meets Requirements",
            EducationEvaluation::PartiallyMeets => "Partially Meets",
            EducationEvaluation::DoesNotMeet => "Does Not Meet",
        }
    }

    pub fn band(&self) -> ScoreBand {
        match self {
            EducationEvaluation::ExceedsRequirements => ScoreBand::Strong,
            EducationEvaluation::MeetsRequirements => ScoreBand::Good,
            EducationEvaluation::PartiallyMeets => ScoreBand::Moderate,
            EducationEvaluation::DoesNotMeet => ScoreBand::Low,
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ExperienceEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EducationEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn score_category(score: u8) -> ScoreCategory {
    match ScoreBand::from_score(u32::from(score)) {
        ScoreBand::Strong => ScoreCategory::StrongMatch,
        ScoreBand::Good => ScoreCategory::GoodMatch,
        ScoreBand::Moderate => ScoreCategory::ModerateMatch,
        ScoreBand::Low => ScoreCategory::LowMatch,
    }
}

pub fn experience_evaluation(score: u8) -> ExperienceEvaluation {
    match ScoreBand::from_score(u32::from(score)) {
        ScoreBand::Strong => ExperienceEvaluation::HighlyRelevant,
        ScoreBand::Good => ExperienceEvaluation::Relevant,
        ScoreBand::Moderate => ExperienceEvaluation::PartiallyRelevant,
        ScoreBand::Low => ExperienceEvaluation::NotRelevant,
    }
}

/// Education label for an already-adjusted score.
///
/// Callers pass the ATS score plus five; values above 100 simply land in the top bucket.
pub fn education_evaluation(score: u32) -> EducationEvaluation {
    match ScoreBand::from_score(score) {
        ScoreBand::Strong => EducationEvaluation::ExceedsRequirements,
        ScoreBand::Good => EducationEvaluation::MeetsRequirements,
        ScoreBand::Moderate => EducationEvaluation::PartiallyMeets,
        ScoreBand::Low => EducationEvaluation::DoesNotMeet,
    }
}

/// Styling tier for an evaluation badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationTier {
    Exceeds,
    Meets,
    Partial,
    NotMeet,
}

impl EvaluationTier {
    pub fn from_band(band: ScoreBand) -> Self {
        match band {
            ScoreBand::Strong => EvaluationTier::Exceeds,
            ScoreBand::Good => EvaluationTier::Meets,
            ScoreBand::Moderate => EvaluationTier::Partial,
            ScoreBand::Low => EvaluationTier::NotMeet,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            EvaluationTier::Exceeds => "eval-exceeds",
            EvaluationTier::Meets => "eval-meets",
            EvaluationTier::Partial => "eval-partial",
            EvaluationTier::NotMeet => "eval-not-meet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_requirements_is_neutral() {
        let mut jitter = RandomJitter::thread_local();
        for matched in [0, 3, 10] {
            assert_eq!(calculate_score(matched, 0, DEFAULT_JITTER_SPREAD, &mut jitter), 75);
        }
    }

    #[test]
    fn test_full_match_stays_in_range() {
        let mut jitter = RandomJitter::thread_local();
        for _ in 0..200 {
            let score = calculate_score(10, 10, DEFAULT_JITTER_SPREAD, &mut jitter);
            assert!((95..=100).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_no_match_stays_in_range() {
        let mut jitter = RandomJitter::seeded(7);
        for _ in 0..200 {
            let score = calculate_score(0, 10, DEFAULT_JITTER_SPREAD, &mut jitter);
            assert!(score <= 5, "score {} out of range", score);
        }
    }

    #[test]
    fn test_half_match_is_within_tolerance() {
        let mut jitter = RandomJitter::seeded(42);
        for _ in 0..200 {
            let score = calculate_score(1, 2, DEFAULT_JITTER_SPREAD, &mut jitter);
            assert!((45..=55).contains(&score));
        }
    }

    #[test]
    fn test_fixed_jitter_is_deterministic_and_clamped() {
        assert_eq!(calculate_score(2, 3, 5.0, &mut FixedJitter(0.0)), 67);
        assert_eq!(calculate_score(1, 2, 5.0, &mut FixedJitter(100.0)), 55);
        assert_eq!(calculate_score(1, 2, 5.0, &mut FixedJitter(-3.0)), 47);
        assert_eq!(calculate_score(1, 2, 0.0, &mut FixedJitter(4.0)), 50);
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut first = RandomJitter::seeded(1234);
        let mut second = RandomJitter::seeded(1234);
        for _ in 0..20 {
            assert_eq!(
                calculate_score(3, 7, DEFAULT_JITTER_SPREAD, &mut first),
                calculate_score(3, 7, DEFAULT_JITTER_SPREAD, &mut second)
            );
        }
    }

    #[test]
    fn test_oversized_spread_is_bounded() {
        let mut jitter = RandomJitter::seeded(1);
        for spread in [1.0e308, f64::INFINITY, f64::MAX] {
            let offset = jitter.offset(spread);
            assert!((-MAX_JITTER_SPREAD..=MAX_JITTER_SPREAD).contains(&offset));
            assert!(calculate_score(1, 2, spread, &mut jitter) <= 100);
        }
        assert_eq!(jitter.offset(f64::NAN), 0.0);
        assert_eq!(bounded_spread(-1.0), 0.0);
    }

    #[test]
    fn test_score_category_boundaries() {
        assert_eq!(score_category(100).to_string(), "Strong match");
        assert_eq!(score_category(90).to_string(), "Strong match");
        assert_eq!(score_category(89).to_string(), "Good match");
        assert_eq!(score_category(75).to_string(), "Good match");
        assert_eq!(score_category(74).to_string(), "Moderate match");
        assert_eq!(score_category(60).to_string(), "Moderate match");
        assert_eq!(score_category(59).to_string(), "Low match");
        assert_eq!(score_category(0).to_string(), "Low match");
    }

    #[test]
    fn test_experience_evaluation_boundaries() {
        assert_eq!(experience_evaluation(90), ExperienceEvaluation::HighlyRelevant);
        assert_eq!(experience_evaluation(75), ExperienceEvaluation::Relevant);
        assert_eq!(experience_evaluation(60), ExperienceEvaluation::PartiallyRelevant);
        assert_eq!(experience_evaluation(59), ExperienceEvaluation::NotRelevant);
    }

    #[test]
    fn test_education_evaluation_accepts_adjusted_scores() {
        assert_eq!(education_evaluation(105), EducationEvaluation::ExceedsRequirements);
        assert_eq!(education_evaluation(89), EducationEvaluation::MeetsRequirements);
        assert_eq!(education_evaluation(60), EducationEvaluation::PartiallyMeets);
        assert_eq!(education_evaluation(5), EducationEvaluation::DoesNotMeet);
        assert_eq!(education_evaluation(74).to_string(), "Partially Meets");
    }

    #[test]
    fn test_labels_serialize_as_display_text() {
        let json = serde_json::to_string(&ScoreCategory::ModerateMatch).unwrap();
        assert_eq!(json, "\"Moderate match\"");
        let json = serde_json::to_string(&EducationEvaluation::DoesNotMeet).unwrap();
        assert_eq!(json, "\"Does Not Meet\"");
    }

    #[test]
    fn test_band_styling() {
        assert_eq!(ScoreBand::from_score(92).hex_color(), "#10B981");
        assert_eq!(score_category(80).band().css_class(), "score-good");
        assert_eq!(
            EvaluationTier::from_band(experience_evaluation(65).band()).css_class(),
            "eval-partial"
        );
    }
}
