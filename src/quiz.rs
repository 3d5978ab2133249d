//! Quiz content parsing and scoring
//!
//! Lesson content arrives as JSON; a malformed payload is an explicit error,
//! never a crash. A session walks the questions one at a time and reports a
//! rounded percentage at the end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum percentage to pass a quiz
pub const PASS_PERCENT: u32 = 70;

/// Errors raised while parsing or validating quiz content
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz payload is not valid JSON: {0}")]
    Parse(String),
    #[error("quiz has no questions")]
    Empty,
    #[error("question {index} needs at least two options")]
    TooFewOptions { index: usize },
    #[error("question {index} marks answer {answer} but only has {options} options")]
    AnswerOutOfRange {
        index: usize,
        answer: usize,
        options: usize,
    },
}

/// A single question; `a` is the index of the correct option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub q: String,
    pub options: Vec<String>,
    pub a: usize,
}

/// Parsed quiz content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSpec {
    pub questions: Vec<Question>,
}

impl QuizSpec {
    /// Parse and validate a JSON payload
    pub fn parse(json: &str) -> Result<Self, QuizError> {
        let spec: QuizSpec =
            serde_json::from_str(json).map_err(|e| QuizError::Parse(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check structural invariants beyond what deserialization enforces
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::Empty);
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(QuizError::TooFewOptions { index });
            }
            if question.a >= question.options.len() {
                return Err(QuizError::AnswerOutOfRange {
                    index,
                    answer: question.a,
                    options: question.options.len(),
                });
            }
        }
        Ok(())
    }
}

/// Result of answering one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub correct: bool,
    /// True once the last question has been answered
    pub finished: bool,
}

/// One attempt at a quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    spec: QuizSpec,
    current: usize,
    score: u32,
}

impl QuizSession {
    pub fn new(spec: QuizSpec) -> Self {
        Self {
            spec,
            current: 0,
            score: 0,
        }
    }

    /// The question awaiting an answer, or `None` when finished
    pub fn current_question(&self) -> Option<&Question> {
        self.spec.questions.get(self.current)
    }

    /// Zero-based index of the current question
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.spec.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.spec.questions.len()
    }

    /// Answer the current question by option index.
    ///
    /// Out-of-range options count as wrong; answering a finished quiz is a
    /// no-op reported as incorrect.
    pub fn answer(&mut self, option: usize) -> Answer {
        let Some(question) = self.spec.questions.get(self.current) else {
            return Answer {
                correct: false,
                finished: true,
            };
        };

        let correct = option == question.a;
        if correct {
            self.score += 1;
        }
        self.current += 1;

        Answer {
            correct,
            finished: self.is_finished(),
        }
    }

    /// Score so far as a rounded percentage of all questions
    pub fn percent(&self) -> u32 {
        let total = self.spec.questions.len();
        if total == 0 {
            return 0;
        }
        (self.score as f32 / total as f32 * 100.0).round() as u32
    }

    pub fn passed(&self) -> bool {
        self.is_finished() && self.percent() >= PASS_PERCENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "questions": [
            {"q": "What does AND(true, false) evaluate to?",
             "options": ["true", "false"], "a": 1},
            {"q": "Which gate inverts its input?",
             "options": ["AND", "OR", "NOT"], "a": 2},
            {"q": "How many comparisons does one bubble-sort tick make?",
             "options": ["one", "the whole pass"], "a": 0}
        ]
    }"#;

    #[test]
    fn test_parse_valid_payload() {
        let spec = QuizSpec::parse(VALID).unwrap();
        assert_eq!(spec.questions.len(), 3);
        assert_eq!(spec.questions[1].a, 2);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            QuizSpec::parse("{not json"),
            Err(QuizError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_quiz_is_an_error() {
        assert_eq!(
            QuizSpec::parse(r#"{"questions": []}"#),
            Err(QuizError::Empty)
        );
    }

    #[test]
    fn test_answer_out_of_range_is_an_error() {
        let json = r#"{"questions": [{"q": "?", "options": ["a", "b"], "a": 5}]}"#;
        assert_eq!(
            QuizSpec::parse(json),
            Err(QuizError::AnswerOutOfRange {
                index: 0,
                answer: 5,
                options: 2,
            })
        );
    }

    #[test]
    fn test_too_few_options_is_an_error() {
        let json = r#"{"questions": [{"q": "?", "options": ["only"], "a": 0}]}"#;
        assert_eq!(
            QuizSpec::parse(json),
            Err(QuizError::TooFewOptions { index: 0 })
        );
    }

    #[test]
    fn test_session_scores_and_rounds() {
        let mut session = QuizSession::new(QuizSpec::parse(VALID).unwrap());

        assert_eq!(session.answer(1), Answer { correct: true, finished: false });
        assert_eq!(session.answer(0), Answer { correct: false, finished: false });
        assert_eq!(session.answer(0), Answer { correct: true, finished: true });

        // 2/3 rounds to 67
        assert_eq!(session.percent(), 67);
        assert!(!session.passed());
    }

    #[test]
    fn test_pass_threshold() {
        let json = r#"{"questions": [
            {"q": "1", "options": ["x", "y"], "a": 0},
            {"q": "2", "options": ["x", "y"], "a": 0},
            {"q": "3", "options": ["x", "y"], "a": 0}
        ]}"#;
        let mut session = QuizSession::new(QuizSpec::parse(json).unwrap());
        session.answer(0);
        session.answer(0);
        session.answer(1);

        // 2/3 is below the 70% bar; 3/3 passes
        assert!(!session.passed());

        let mut aced = QuizSession::new(QuizSpec::parse(json).unwrap());
        aced.answer(0);
        aced.answer(0);
        aced.answer(0);
        assert_eq!(aced.percent(), 100);
        assert!(aced.passed());
    }

    #[test]
    fn test_answering_finished_quiz_is_inert() {
        let json = r#"{"questions": [{"q": "?", "options": ["x", "y"], "a": 0}]}"#;
        let mut session = QuizSession::new(QuizSpec::parse(json).unwrap());
        session.answer(0);
        assert!(session.is_finished());

        let extra = session.answer(0);
        assert!(!extra.correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.percent(), 100);
    }
}
