//! Mindset Classifier
//!
//! Turns a learner's answers into a dominant style. Two strategies:
//! - Weighted: each (question, option) adds a fixed weight to one style
//! - Sum: raw numeric answers are summed and bucketed by two thresholds
//!
//! Both are pure functions of their input and the static tables.

use crate::error::{EngineError, Result};
use crate::tables;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// What to do when no answers were given at all
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmptyAnswerPolicy {
    /// Fail with `InvalidInput`
    #[default]
    Reject,
    /// Proceed to the all-zero tie-break
    Accept,
}

impl EmptyAnswerPolicy {
    fn check(&self, answers: &AnswerSet) -> Result<()> {
        if answers.is_empty() && *self == EmptyAnswerPolicy::Reject {
            return Err(EngineError::InvalidInput("no answers provided".to_string()));
        }
        Ok(())
    }
}

/// A strategy that maps answers to a style
pub trait Classifier {
    fn classify(&self, answers: &AnswerSet) -> Result<ClassificationResult>;
}

/// Weighted-rule classification over `tables::WEIGHT_TABLE`
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedClassifier {
    pub empty_answers: EmptyAnswerPolicy,
}

impl WeightedClassifier {
    pub fn new(empty_answers: EmptyAnswerPolicy) -> Self {
        Self { empty_answers }
    }

    /// Accumulate scores; returns the tally and how many answers counted
    pub fn tally(answers: &AnswerSet) -> (ScoreTally, usize) {
        let mut scores = ScoreTally::default();
        let mut answered = 0;

        for (question, value) in answers {
            let Some(option) = value.as_option() else {
                continue;
            };
            if let Some((style, weight)) = tables::weight_for(question.trim(), &option) {
                scores.add(style, weight);
                answered += 1;
            }
        }

        (scores, answered)
    }
}

impl Classifier for WeightedClassifier {
    fn classify(&self, answers: &AnswerSet) -> Result<ClassificationResult> {
        self.empty_answers.check(answers)?;

        let (scores, answered) = Self::tally(answers);
        let style = scores.dominant();
        tracing::debug!(%style, ?scores, answered, "weighted classification");

        Ok(build_result(style, scores, StrategyKind::Weighted, answered))
    }
}

/// Sum-of-raw-values classification
///
/// Total <= 20 is Short, 21..=35 is Elaborate, above 35 is Realistic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumClassifier {
    pub empty_answers: EmptyAnswerPolicy,
}

impl SumClassifier {
    pub fn new(empty_answers: EmptyAnswerPolicy) -> Self {
        Self { empty_answers }
    }

    pub fn bucket(total: f64) -> MindsetStyle {
        if total <= tables::SUM_SHORT_MAX {
            MindsetStyle::Short
        } else if total <= tables::SUM_ELABORATE_MAX {
            MindsetStyle::Elaborate
        } else {
            MindsetStyle::Realistic
        }
    }
}

impl Classifier for SumClassifier {
    fn classify(&self, answers: &AnswerSet) -> Result<ClassificationResult> {
        self.empty_answers.check(answers)?;

        let values: Vec<f64> = answers.values().filter_map(AnswerValue::as_number).collect();
        let total: f64 = values.iter().sum();
        let style = Self::bucket(total);

        // Negative totals can't be shown as a score; they still bucket as Short.
        // The float-to-int cast saturates at u32::MAX.
        let mut scores = ScoreTally::default();
        scores.add(style, total.max(0.0).round() as u32);
        tracing::debug!(%style, total, "sum classification");

        Ok(build_result(style, scores, StrategyKind::Sum, values.len()))
    }
}

/// Caller-selected classification strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationStrategy {
    #[default]
    Weighted,
    Sum,
}

impl ClassificationStrategy {
    pub fn with_policy(self, empty_answers: EmptyAnswerPolicy) -> Box<dyn Classifier + Send + Sync> {
        match self {
            ClassificationStrategy::Weighted => Box::new(WeightedClassifier::new(empty_answers)),
            ClassificationStrategy::Sum => Box::new(SumClassifier::new(empty_answers)),
        }
    }
}

impl Classifier for ClassificationStrategy {
    fn classify(&self, answers: &AnswerSet) -> Result<ClassificationResult> {
        self.with_policy(EmptyAnswerPolicy::default()).classify(answers)
    }
}

fn build_result(
    style: MindsetStyle,
    scores: ScoreTally,
    strategy: StrategyKind,
    answered: usize,
) -> ClassificationResult {
    let percentages = scores.percentages();

    ClassificationResult {
        style,
        scores,
        strategy,
        explanation: tables::explanation(style).to_string(),
        suggested_content: tables::SUGGESTED_CONTENT.iter().map(|s| s.to_string()).collect(),
        next_step: tables::next_step(style),
        match_percentage: percentages.get(style),
        percentages,
        answered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, AnswerValue)]) -> AnswerSet {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn letters(pairs: &[(&str, &str)]) -> AnswerSet {
        pairs.iter().map(|(k, v)| (k.to_string(), AnswerValue::from(*v))).collect()
    }

    fn numbers(values: &[i64]) -> AnswerSet {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("q{}", i + 1), AnswerValue::Number(*v)))
            .collect()
    }

    // =========================================================================
    // Weighted strategy
    // =========================================================================

    #[test]
    fn test_weighted_scenario() {
        let result = WeightedClassifier::default()
            .classify(&letters(&[("q1", "A"), ("q2", "B"), ("q7", "C")]))
            .unwrap();

        assert_eq!(result.style, MindsetStyle::Realistic);
        assert_eq!(result.scores, ScoreTally { short: 2, elaborate: 2, realistic: 3 });
        assert_eq!(result.strategy, StrategyKind::Weighted);
        assert_eq!(result.answered, 3);
        assert_eq!(result.match_percentage, 43);
        assert_eq!(
            result.percentages,
            StylePercentages { short: 29, elaborate: 29, realistic: 43 }
        );
        assert!(result.next_step.contains("Realistic"));
    }

    #[test]
    fn test_weighted_normalizes_options() {
        let result = WeightedClassifier::default()
            .classify(&letters(&[("q8", "  a "), ("q9", "b")]))
            .unwrap();
        assert_eq!(result.scores, ScoreTally { short: 3, elaborate: 3, realistic: 0 });
        // Tie between Short and Elaborate goes to Short
        assert_eq!(result.style, MindsetStyle::Short);
    }

    #[test]
    fn test_unrecognized_only_is_all_zero_tie() {
        let input = answers(&[
            ("q42", AnswerValue::from("A")),
            ("q1", AnswerValue::from("Z")),
            ("q2", AnswerValue::Number(3)),
        ]);
        let classifier = WeightedClassifier::default();
        let first = classifier.classify(&input).unwrap();
        let second = classifier.classify(&input).unwrap();

        assert_eq!(first.scores, ScoreTally::default());
        assert_eq!(first.style, MindsetStyle::Short);
        assert_eq!(first.answered, 0);
        assert_eq!(first.match_percentage, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_sum_matches_recognized_weights() {
        let input = letters(&[
            ("q1", "B"),
            ("q3", "C"),
            ("q5", "A"),
            ("q9", "B"),
            ("q10", "c"),
            ("q11", "A"),
            ("q4", "D"),
        ]);
        let (scores, answered) = WeightedClassifier::tally(&input);

        let expected: u32 = [("q1", "B"), ("q3", "C"), ("q5", "A"), ("q9", "B"), ("q10", "C")]
            .iter()
            .filter_map(|(q, o)| tables::weight_for(q, o))
            .map(|(_, w)| w)
            .sum();
        assert_eq!(scores.total(), expected);
        assert_eq!(answered, 5);
    }

    #[test]
    fn test_empty_answers_policy() {
        let empty = AnswerSet::new();
        let err = WeightedClassifier::default().classify(&empty).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));

        let result = WeightedClassifier::new(EmptyAnswerPolicy::Accept)
            .classify(&empty)
            .unwrap();
        assert_eq!(result.style, MindsetStyle::Short);
        assert_eq!(result.scores, ScoreTally::default());
    }

    // =========================================================================
    // Sum strategy
    // =========================================================================

    #[test]
    fn test_sum_boundaries() {
        let classifier = SumClassifier::default();
        let style_of = |values: &[i64]| classifier.classify(&numbers(values)).unwrap().style;

        assert_eq!(style_of(&[10, 10]), MindsetStyle::Short);
        assert_eq!(style_of(&[10, 11]), MindsetStyle::Elaborate);
        assert_eq!(style_of(&[20, 15]), MindsetStyle::Elaborate);
        assert_eq!(style_of(&[20, 16]), MindsetStyle::Realistic);
    }

    #[test]
    fn test_sum_parses_numeric_strings_and_skips_letters() {
        let input = answers(&[
            ("q1", AnswerValue::from(" 12 ")),
            ("q2", AnswerValue::Number(10)),
            ("q3", AnswerValue::from("A")),
        ]);
        let result = SumClassifier::default().classify(&input).unwrap();

        assert_eq!(result.style, MindsetStyle::Elaborate);
        assert_eq!(result.scores.elaborate, 22);
        assert_eq!(result.answered, 2);
        assert_eq!(result.strategy, StrategyKind::Sum);
    }

    #[test]
    fn test_sum_does_not_overflow() {
        let input = answers(&[("q1", AnswerValue::Number(i64::MAX)), ("q2", AnswerValue::Number(1))]);
        let result = SumClassifier::default().classify(&input).unwrap();

        assert_eq!(result.style, MindsetStyle::Realistic);
        assert_eq!(result.scores.realistic, u32::MAX);
        assert_eq!(result.match_percentage, 100);

        let result = SumClassifier::default()
            .classify(&numbers(&[i64::MIN, -1]))
            .unwrap();
        assert_eq!(result.style, MindsetStyle::Short);
        assert_eq!(result.scores, ScoreTally::default());
    }

    #[test]
    fn test_sum_counts_floats_and_skips_null_and_bool() {
        let input: AnswerSet =
            serde_json::from_str(r#"{"q1": 10.5, "q2": 10, "q3": null, "q4": true}"#).unwrap();
        let result = SumClassifier::default().classify(&input).unwrap();

        // 20.5 is past the Short threshold
        assert_eq!(result.style, MindsetStyle::Elaborate);
        assert_eq!(result.answered, 2);
    }

    #[test]
    fn test_weighted_ignores_non_letter_values() {
        let input: AnswerSet = serde_json::from_str(r#"{"q1": "A", "q2": null, "q7": 2.5}"#).unwrap();
        let result = WeightedClassifier::default().classify(&input).unwrap();

        assert_eq!(result.style, MindsetStyle::Short);
        assert_eq!(result.scores, ScoreTally { short: 2, elaborate: 0, realistic: 0 });
        assert_eq!(result.answered, 1);
    }

    #[test]
    fn test_sum_empty_policy() {
        assert!(SumClassifier::default().classify(&AnswerSet::new()).is_err());
        let result = SumClassifier::new(EmptyAnswerPolicy::Accept)
            .classify(&AnswerSet::new())
            .unwrap();
        assert_eq!(result.style, MindsetStyle::Short);
    }

    // =========================================================================
    // Strategy selection
    // =========================================================================

    #[test]
    fn test_strategy_dispatch() {
        let input = answers(&[("q1", AnswerValue::Number(40))]);

        let weighted = ClassificationStrategy::Weighted.classify(&input).unwrap();
        assert_eq!(weighted.strategy, StrategyKind::Weighted);
        assert_eq!(weighted.style, MindsetStyle::Short);

        let sum = ClassificationStrategy::Sum.classify(&input).unwrap();
        assert_eq!(sum.strategy, StrategyKind::Sum);
        assert_eq!(sum.style, MindsetStyle::Realistic);
    }

    #[test]
    fn test_strategy_deserializes_lowercase() {
        let strategy: ClassificationStrategy = serde_json::from_str("\"sum\"").unwrap();
        assert_eq!(strategy, ClassificationStrategy::Sum);
    }
}
