//! Expected response shapes, validated structurally after JSON decoding.
//!
//! Prompt text alone cannot be trusted to produce conformant output, so each
//! task carries an explicit shape descriptor that is checked against the
//! decoded value before typed deserialization.

use serde_json::Value;

/// Expected kind of the JSON root value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Object,
    Array,
}

/// Structural expectations for a task's response
#[derive(Debug, Clone)]
pub struct Shape {
    pub kind: RootKind,
    /// Top-level keys that must be present (objects only)
    pub required_keys: &'static [&'static str],
}

/// Course outlines must carry a title and modules
pub const COURSE_SHAPE: Shape = Shape {
    kind: RootKind::Object,
    required_keys: &["title", "modules"],
};

/// Quizzes must carry a questions array
pub const QUIZ_SHAPE: Shape = Shape {
    kind: RootKind::Object,
    required_keys: &["questions"],
};

/// Recommendations are a bare array of course names
pub const RECOMMENDATIONS_SHAPE: Shape = Shape {
    kind: RootKind::Array,
    required_keys: &[],
};

impl Shape {
    /// Check a decoded value against this shape.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self.kind {
            RootKind::Object => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| "expected a JSON object at the root".to_string())?;
                for key in self.required_keys {
                    if !obj.contains_key(*key) {
                        return Err(format!("missing required key \"{key}\""));
                    }
                }
                Ok(())
            }
            RootKind::Array => {
                if value.is_array() {
                    Ok(())
                } else {
                    Err("expected a JSON array at the root".to_string())
                }
            }
        }
    }
}
