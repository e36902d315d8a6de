//! Quiz records as stored by the admin panel.
//!
//! Field names match the JSON the admin panel has always written, so lists
//! stored by earlier versions load unchanged.

use serde::{Deserialize, Serialize};

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
    pub topic: String,
    #[serde(default)]
    pub explanation: String,
    /// Optional image as a data URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl Question {
    fn builtin(
        question: &str,
        options: [&str; 4],
        correct: usize,
        topic: &str,
        explanation: &str,
    ) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct,
            topic: topic.to_string(),
            explanation: explanation.to_string(),
            image: None,
        }
    }
}

/// A question topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Topics seeded when no topic list has been stored yet.
#[must_use]
pub fn default_topics() -> Vec<Topic> {
    vec![
        Topic::new(
            "Arithmetic",
            "Basic addition, subtraction, multiplication, division",
        ),
        Topic::new("Algebra", "Equations, variables, and algebraic expressions"),
        Topic::new("Geometry", "Shapes, angles, areas, and volumes"),
        Topic::new("Calculus", "Derivatives, integrals, and limits"),
        Topic::new("Probability", "Chance, statistics, and data analysis"),
        Topic::new("Percentages", "Percentage calculations and applications"),
        Topic::new("Sequences", "Number patterns and series"),
        Topic::new(
            "Linear Algebra",
            "Matrices, vectors, and linear transformations",
        ),
    ]
}

/// The built-in question bank.
#[must_use]
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::builtin(
            "What is 15 + 27?",
            ["42", "41", "43", "40"],
            0,
            "Arithmetic",
            "15 + 27 = 42",
        ),
        Question::builtin(
            "What is 8 × 7?",
            ["54", "56", "58", "60"],
            1,
            "Arithmetic",
            "8 × 7 = 56",
        ),
        Question::builtin(
            "What is 144 ÷ 12?",
            ["10", "11", "12", "13"],
            2,
            "Arithmetic",
            "144 ÷ 12 = 12",
        ),
        Question::builtin(
            "What is 5² + 3²?",
            ["32", "34", "36", "38"],
            1,
            "Algebra",
            "5² + 3² = 25 + 9 = 34",
        ),
        Question::builtin(
            "What is √64?",
            ["6", "7", "8", "9"],
            2,
            "Algebra",
            "√64 = 8 (since 8 × 8 = 64)",
        ),
        Question::builtin(
            "What is 2³ × 3²?",
            ["70", "72", "74", "76"],
            1,
            "Algebra",
            "2³ × 3² = 8 × 9 = 72",
        ),
        Question::builtin(
            "What is 15% of 200?",
            ["25", "30", "35", "40"],
            1,
            "Percentages",
            "15% of 200 = 0.15 × 200 = 30",
        ),
        Question::builtin(
            "What is the area of a circle with radius 7? (π ≈ 3.14)",
            ["147.86", "153.86", "159.86", "165.86"],
            1,
            "Geometry",
            "Area = πr² = 3.14 × 7² = 3.14 × 49 = 153.86",
        ),
        Question::builtin(
            "What is 3x + 5 = 20, find x?",
            ["3", "4", "5", "6"],
            2,
            "Algebra",
            "3x + 5 = 20, so 3x = 15, therefore x = 5",
        ),
        Question::builtin(
            "What is the derivative of x²?",
            ["x", "2x", "x²", "2x²"],
            1,
            "Calculus",
            "The derivative of x² is 2x using the power rule",
        ),
        Question::builtin(
            "What is ∫(2x + 3)dx?",
            ["x² + 3x + C", "2x² + 3x + C", "x² + 6x + C", "2x² + 6x + C"],
            0,
            "Calculus",
            "∫(2x + 3)dx = x² + 3x + C",
        ),
        Question::builtin(
            "What is the limit of (x² - 4)/(x - 2) as x approaches 2?",
            ["2", "3", "4", "5"],
            2,
            "Calculus",
            "Using L'Hôpital's rule or factoring: (x² - 4)/(x - 2) = (x + 2), so limit is 4",
        ),
        Question::builtin(
            "What is the determinant of [[2,3],[4,5]]?",
            ["-2", "-1", "1", "2"],
            0,
            "Linear Algebra",
            "det = (2×5) - (3×4) = 10 - 12 = -2",
        ),
        Question::builtin(
            "What is the sum of the first 10 natural numbers?",
            ["50", "55", "60", "65"],
            1,
            "Sequences",
            "Sum = n(n+1)/2 = 10(11)/2 = 55",
        ),
        Question::builtin(
            "What is the probability of rolling a 6 on a fair die?",
            ["1/3", "1/4", "1/5", "1/6"],
            3,
            "Probability",
            "There is 1 favorable outcome out of 6 possible outcomes, so 1/6",
        ),
    ]
}
