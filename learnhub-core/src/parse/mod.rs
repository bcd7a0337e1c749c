//! Tolerant extraction of structured data from free-form backend output.
//!
//! Backend responses are unstructured text and commonly arrive wrapped in a
//! markdown code fence, with or without a language tag. The tolerance policy
//! here is deliberate and fixed: strip at most one leading and one trailing
//! fence, then the remainder must decode as JSON matching the expected
//! shape. Looser heuristics risk silently accepting garbage; stricter ones
//! reject output the backend commonly produces.

pub mod shape;

pub use shape::{RootKind, Shape, COURSE_SHAPE, QUIZ_SHAPE, RECOMMENDATIONS_SHAPE};

use crate::error::HubError;
use serde::de::DeserializeOwned;

/// Strip an optional markdown code fence from around the payload.
///
/// Accepts at most one opening fence (```json or bare ```) and one closing
/// fence. Anything beyond that is left for the JSON decoder to reject.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    text = text.trim_end();
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Decode backend output as JSON and validate it against the expected shape.
///
/// Never panics on malformed input: any failure (invalid JSON, wrong root
/// kind, missing required keys, type mismatch during typed decoding) is
/// returned as [`HubError::Parse`] carrying the raw text.
pub fn parse_response<T: DeserializeOwned>(raw: &str, shape: &Shape) -> Result<T, HubError> {
    let body = strip_fences(raw);

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| HubError::parse(raw, format!("invalid JSON: {e}")))?;

    shape
        .check(&value)
        .map_err(|reason| HubError::parse(raw, reason))?;

    serde_json::from_value(value).map_err(|e| HubError::parse(raw, format!("shape mismatch: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Course, Quiz};

    const COURSE_JSON: &str = r#"{
        "title": "Rust for Beginners",
        "description": "An introduction to Rust",
        "modules": [
            {"name": "Ownership", "topics": ["moves", "borrows"], "duration": "1 week"}
        ],
        "learning_outcomes": ["Understand ownership"],
        "prerequisites": ["Basic programming"]
    }"#;

    const QUIZ_JSON: &str = r#"{
        "questions": [
            {
                "question": "What does println! do?",
                "options": ["A) Prints", "B) Loops", "C) Allocates", "D) Panics"],
                "correct": "A",
                "explanation": "It prints to stdout"
            }
        ]
    }"#;

    #[test]
    fn parses_fenced_json_with_language_tag() {
        let raw = format!("```json\n{COURSE_JSON}\n```");
        let course: Course = parse_response(&raw, &COURSE_SHAPE).unwrap();
        assert_eq!(course.title, "Rust for Beginners");
        assert_eq!(course.modules.len(), 1);
    }

    #[test]
    fn parses_fenced_json_without_language_tag() {
        let raw = format!("```\n{QUIZ_JSON}\n```");
        let quiz: Quiz = parse_response(&raw, &QUIZ_SHAPE).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct, "A");
    }

    #[test]
    fn parses_unfenced_json() {
        let course: Course = parse_response(COURSE_JSON, &COURSE_SHAPE).unwrap();
        assert_eq!(course.title, "Rust for Beginners");
    }

    #[test]
    fn fence_round_trip_is_lossless() {
        let original: serde_json::Value = serde_json::from_str(COURSE_JSON).unwrap();
        let fenced = format!("```json\n{}\n```", serde_json::to_string_pretty(&original).unwrap());
        let reparsed: serde_json::Value =
            serde_json::from_str(strip_fences(&fenced)).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn missing_closing_fence_is_tolerated() {
        let raw = format!("```json\n{QUIZ_JSON}");
        let quiz: Quiz = parse_response(&raw, &QUIZ_SHAPE).unwrap();
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn truncated_json_fails_with_parse_error() {
        let raw = "```json\n{\"questions\": [{\"question\": \"unfinished";
        let err = parse_response::<Quiz>(raw, &QUIZ_SHAPE).unwrap_err();
        match err {
            HubError::Parse { raw: kept, reason } => {
                assert!(kept.contains("unfinished"));
                assert!(reason.contains("invalid JSON"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_key_fails() {
        let raw = r#"{"title": "No modules here"}"#;
        let err = parse_response::<Course>(raw, &COURSE_SHAPE).unwrap_err();
        match err {
            HubError::Parse { reason, .. } => assert!(reason.contains("modules")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn recommendations_must_be_an_array() {
        let ok: Vec<String> =
            parse_response(r#"["Course 1", "Course 2"]"#, &RECOMMENDATIONS_SHAPE).unwrap();
        assert_eq!(ok.len(), 2);

        let err =
            parse_response::<Vec<String>>(r#"{"courses": []}"#, &RECOMMENDATIONS_SHAPE)
                .unwrap_err();
        assert!(matches!(err, HubError::Parse { .. }));
    }

    #[test]
    fn option_counts_other_than_four_are_accepted_as_is() {
        // Shape validation stops at required top-level keys; a reply with
        // short or long option lists is passed through for the caller to
        // render, and grading still works by letter tag.
        let raw = r#"{
            "questions": [
                {
                    "question": "Pick one",
                    "options": ["A) yes", "B) no", "C) maybe"],
                    "correct": "B",
                    "explanation": ""
                },
                {
                    "question": "Pick another",
                    "options": ["A) 1", "B) 2", "C) 3", "D) 4", "E) 5"],
                    "correct": "E",
                    "explanation": ""
                }
            ]
        }"#;

        let quiz: Quiz = parse_response(raw, &QUIZ_SHAPE).unwrap();
        assert_eq!(quiz.questions[0].options.len(), 3);
        assert_eq!(quiz.questions[1].options.len(), 5);
        assert_eq!(
            quiz.grade(&["B".to_string(), "E".to_string()]),
            100.0
        );
    }

    #[test]
    fn surrounding_prose_is_rejected() {
        let raw = format!("Here is your quiz:\n{QUIZ_JSON}");
        assert!(parse_response::<Quiz>(&raw, &QUIZ_SHAPE).is_err());
    }
}
