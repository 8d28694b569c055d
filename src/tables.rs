//! Static domain tables: question weights, explanations and style profiles.
//!
//! All of this is fixed at compile time. Nothing here is mutated at runtime
//! and there is no per-learner variant.

use crate::types::MindsetStyle::{self, Elaborate, Realistic, Short};
use crate::types::StyleProfile;

/// (option letter, style, weight)
pub type OptionWeight = (&'static str, MindsetStyle, u32);

/// Per-question weights. Every question offers A/B/C, one style per letter.
pub const WEIGHT_TABLE: &[(&str, [OptionWeight; 3])] = &[
    ("q1", [("A", Short, 2), ("B", Elaborate, 1), ("C", Realistic, 1)]),
    ("q2", [("A", Short, 1), ("B", Elaborate, 2), ("C", Realistic, 1)]),
    ("q3", [("A", Short, 1), ("B", Elaborate, 1), ("C", Realistic, 2)]),
    ("q4", [("A", Short, 2), ("B", Elaborate, 2), ("C", Realistic, 1)]),
    ("q5", [("A", Short, 1), ("B", Elaborate, 2), ("C", Realistic, 2)]),
    ("q6", [("A", Short, 2), ("B", Elaborate, 1), ("C", Realistic, 2)]),
    ("q7", [("A", Short, 1), ("B", Elaborate, 1), ("C", Realistic, 3)]),
    ("q8", [("A", Short, 3), ("B", Elaborate, 1), ("C", Realistic, 1)]),
    ("q9", [("A", Short, 1), ("B", Elaborate, 3), ("C", Realistic, 1)]),
    ("q10", [("A", Short, 2), ("B", Elaborate, 2), ("C", Realistic, 2)]),
];

/// Look up the style and weight for a (question, normalized option) pair
pub fn weight_for(question: &str, option: &str) -> Option<(MindsetStyle, u32)> {
    WEIGHT_TABLE
        .iter()
        .find(|(q, _)| *q == question)
        .and_then(|(_, options)| options.iter().find(|(letter, _, _)| *letter == option))
        .map(|(_, style, weight)| (*style, *weight))
}

/// Sum strategy: totals up to and including this are Short
pub const SUM_SHORT_MAX: f64 = 20.0;
/// Sum strategy: totals up to and including this (and above SUM_SHORT_MAX) are Elaborate
pub const SUM_ELABORATE_MAX: f64 = 35.0;

/// Content identifiers suggested after every classification
pub const SUGGESTED_CONTENT: [&str; 3] = ["learning_path_core", "skill_mapping", "course_catalog"];

pub fn explanation(style: MindsetStyle) -> &'static str {
    match style {
        Short => "You prefer short, focused content that gets straight to the key points.",
        Elaborate => "You learn best from detailed explanations that give the full context and reasoning.",
        Realistic => "You respond to practical, real-world material with concrete examples and measurable outcomes.",
    }
}

pub fn next_step(style: MindsetStyle) -> String {
    format!(
        "Continue to your personalized learning path with {} content selected for you.",
        style.name()
    )
}

pub fn profile(style: MindsetStyle) -> StyleProfile {
    match style {
        Realistic => StyleProfile {
            style,
            title: "Realistic Communicator",
            description: "You prefer fact-based, data-driven communication with concrete examples and measurable outcomes.",
            learning_approach: [
                "Focus on case studies and real-world applications",
                "Emphasize quantifiable achievements and metrics",
                "Practice with actual interview scenarios and questions",
                "Use specific examples and proven methodologies",
            ],
            resume_style: "Your resume should highlight specific accomplishments with numbers, percentages, and concrete results.",
            interview_style: "In interviews, focus on providing evidence-based answers with clear timelines and measurable impacts.",
        },
        Elaborate => StyleProfile {
            style,
            title: "Elaborate Communicator",
            description: "You excel at comprehensive storytelling, providing context, and explaining the bigger picture.",
            learning_approach: [
                "Comprehensive guides with background and reasoning",
                "Understanding company culture and full context",
                "Building narratives that connect experiences",
                "Exploring multiple perspectives and approaches",
            ],
            resume_style: "Your resume should tell your professional story with context, showing career progression and growth.",
            interview_style: "In interviews, leverage your storytelling ability to paint complete pictures of your experiences.",
        },
        Short => StyleProfile {
            style,
            title: "Concise Communicator",
            description: "You value efficiency and clarity, delivering key points with precision and impact.",
            learning_approach: [
                "Practical guides with actionable takeaways",
                "Key talking points and essential preparation",
                "Quick reference materials and checklists",
                "Focused, results-oriented content",
            ],
            resume_style: "Your resume should be clean and impactful, highlighting key achievements with strong action verbs.",
            interview_style: "In interviews, deliver clear, confident answers that quickly establish your value proposition.",
        },
    }
}
