//! Prompt builders for the three generation tasks.
//!
//! Each builder is a pure function from task parameters to a prompt string
//! that states the task, embeds the exact target JSON shape, and instructs
//! the backend to emit only that JSON with no surrounding prose. The parser
//! in [`crate::parse`] validates the result against the matching shape.

use crate::types::{CourseParams, QuizParams, RecommendationParams};

/// Build the course outline prompt.
pub fn course_prompt(params: &CourseParams) -> String {
    format!(
        r#"Create a detailed course outline for "{topic}" at {level} level.
The course should be designed for {duration} of learning.

Format the response as JSON with the following structure:
{{
    "title": "Course Title",
    "description": "Brief description",
    "modules": [
        {{
            "name": "Module Name",
            "topics": ["Topic 1", "Topic 2"],
            "duration": "Estimated time"
        }}
    ],
    "learning_outcomes": ["Outcome 1", "Outcome 2"],
    "prerequisites": ["Prerequisite 1"]
}}

Provide only the JSON, no additional text."#,
        topic = params.topic,
        level = params.level,
        duration = params.duration,
    )
}

/// Build the multiple-choice quiz prompt.
pub fn quiz_prompt(params: &QuizParams) -> String {
    format!(
        r#"Generate {count} multiple-choice questions about "{topic}" at {difficulty} difficulty level.

Format as JSON:
{{
    "questions": [
        {{
            "question": "Question text?",
            "options": ["A) Option 1", "B) Option 2", "C) Option 3", "D) Option 4"],
            "correct": "A",
            "explanation": "Why this is correct"
        }}
    ]
}}

Provide only the JSON."#,
        count = params.count,
        topic = params.topic,
        difficulty = params.difficulty,
    )
}

/// Build the course recommendation prompt.
pub fn recommendations_prompt(params: &RecommendationParams) -> String {
    let history = params.history.join(", ");
    let preferences = params
        .preferences
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Based on learning history: [{history}] and preferences: [{preferences}],
recommend 5 relevant courses. Return only a JSON array of course names:
["Course 1", "Course 2", "Course 3", "Course 4", "Course 5"]"#,
    )
}
