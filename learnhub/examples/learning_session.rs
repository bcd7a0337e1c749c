//! A complete learning session against the Gemini backend.
//!
//! This demonstrates:
//! 1. Building a generator from a backend with a logging layer
//! 2. Generating a course outline and recording it
//! 3. Generating a quiz, grading answers, and recording the attempt
//! 4. Recommendations driven by the recorded course history
//!
//! Run with:
//! ```sh
//! GEMINI_API_KEY=... cargo run --example learning_session
//! ```

use learnhub::layer::LoggingLayer;
use learnhub::prelude::*;
use learnhub::provider::GeminiBackend;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let api_key =
        std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY environment variable not set");

    let backend = GeminiBackend::new(api_key)?;
    let generator = ContentGenerator::builder(backend)
        .layer(LoggingLayer::new())
        .finish();
    let progress = ProgressStore::new();
    let user = "demo";

    // Example 1: Generate a course outline
    println!("=== Example 1: Course Outline ===");
    let course_params = CourseParams::new(
        "Rust Programming",
        CourseLevel::Beginner,
        CourseDuration::OneMonth,
    );

    match generator.generate_course(&course_params).await {
        Ok(course) => {
            println!("{}: {}", course.title, course.description);
            for (i, module) in course.modules.iter().enumerate() {
                println!("  Module {}: {} ({})", i + 1, module.name, module.duration);
                for topic in &module.topics {
                    println!("    - {topic}");
                }
            }
            progress.record_course(user, course);
        }
        Err(e) => eprintln!("course generation failed: {e}"),
    }

    // Example 2: Generate and grade a quiz
    println!("\n=== Example 2: Quiz ===");
    let quiz_params = QuizParams::new("Rust Programming", QuizDifficulty::Easy, 3);

    match generator.generate_quiz(&quiz_params).await {
        Ok(quiz) => {
            for (i, q) in quiz.questions.iter().enumerate() {
                println!("Q{}: {}", i + 1, q.question);
                for option in &q.options {
                    println!("   {option}");
                }
            }

            // Pretend the learner always answers "A"
            let answers = vec!["A".to_string(); quiz.questions.len()];
            let score = quiz.grade(&answers);
            println!("Score: {score:.1}%");

            progress.record_quiz_attempt(user, QuizAttempt::now(&quiz_params.topic, score));
        }
        Err(HubError::RateLimited { wait_secs }) => {
            eprintln!("rate limited, wait {wait_secs}s before retrying")
        }
        Err(e) => eprintln!("quiz generation failed: {e}"),
    }

    // Example 3: Recommendations from recorded history and preferences
    println!("\n=== Example 3: Recommendations ===");
    progress.set_preferences(
        user,
        ["Programming".to_string(), "AI/ML".to_string()]
            .into_iter()
            .collect(),
    );
    let rec_params = RecommendationParams {
        history: progress.course_topics(user),
        preferences: progress.get_or_init(user).preferences,
    };
    for rec in generator.generate_recommendations(&rec_params).await {
        println!("  - {rec}");
    }

    // Session stats
    let stats = progress.get_or_init(user);
    println!(
        "\nCourses: {}, quizzes: {}, average score: {}",
        stats.courses_completed,
        stats.quizzes_taken,
        progress
            .average_score(user)
            .map_or("n/a".to_string(), |s| format!("{s:.1}%"))
    );
    println!(
        "Requests used this minute: {}/10",
        generator.requests_used()
    );

    Ok(())
}
