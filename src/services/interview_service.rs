use std::sync::Arc;

use chrono::Utc;

use crate::models::category::QuestionCatalog;
use crate::models::question::Question;
use crate::models::session::Session;
use crate::services::grading_service::GradingService;
use crate::services::selection_service::SelectionService;
use crate::services::session_service::{SessionFate, SessionService};

/// Questions per completed interview.
pub const QUESTION_QUOTA: u32 = 3;

pub const MSG_NO_QUESTIONS: &str =
    "Sorry, no interview questions are available right now. Please try again later.";
pub const MSG_INTERNAL: &str =
    "Something went wrong on our side. Please send your message again.";

/// Maps a percentage score to its qualitative band.
pub fn grade_band(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "excellent"
    } else if percentage >= 70.0 {
        "good"
    } else if percentage >= 50.0 {
        "satisfactory"
    } else {
        "needs improvement"
    }
}

/// Drives the per-user interview state machine: ask the next question when
/// nothing is pending, grade the pending question otherwise, and wrap up
/// once the quota is reached.
#[derive(Clone)]
pub struct InterviewService {
    catalog: Arc<QuestionCatalog>,
    sessions: SessionService,
}

impl InterviewService {
    pub fn new(catalog: Arc<QuestionCatalog>, sessions: SessionService) -> Self {
        Self { catalog, sessions }
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// The single entry point for inbound interview messages. Infallible
    /// from the transport's point of view: typed failures become fixed
    /// replies inside the flow, and a panicking transition is caught here
    /// and turned into a generic apology, leaving the session untouched.
    pub async fn handle_message(&self, user_id: &str, text: &str) -> String {
        let svc = self.clone();
        let user_id = user_id.to_string();
        let text = text.to_string();
        match tokio::task::spawn_blocking(move || svc.advance(&user_id, &text)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = ?e, "interview transition failed");
                MSG_INTERNAL.to_string()
            }
        }
    }

    fn advance(&self, user_id: &str, text: &str) -> String {
        self.sessions.with_session(user_id, |session| {
            match session.pending.take() {
                Some(question) => self.grade(session, &question, text),
                None => self.ask(session),
            }
        })
    }

    fn ask(&self, session: &mut Session) -> (String, SessionFate) {
        match SelectionService::select_random(&self.catalog) {
            Ok(question) => {
                let prompt = format_prompt(&question, session.question_count + 1);
                session.pending = Some(question);
                (prompt, SessionFate::Keep)
            }
            Err(e) => {
                tracing::warn!(user_id = %session.user_id, error = %e, "question selection failed");
                (MSG_NO_QUESTIONS.to_string(), SessionFate::Keep)
            }
        }
    }

    fn grade(&self, session: &mut Session, question: &Question, raw: &str) -> (String, SessionFate) {
        let eval = GradingService::evaluate(question, raw);
        session.question_count += 1;
        if eval.correct {
            session.correct_count += 1;
        }

        let mut reply = format!(
            "{} ({}/{} answered)\nThe right answer is: {}",
            eval.message, session.question_count, QUESTION_QUOTA, eval.correct_answer
        );
        if !eval.hint.is_empty() {
            reply.push_str("\nHint: ");
            reply.push_str(&eval.hint);
        }

        if session.question_count < QUESTION_QUOTA {
            return (reply, SessionFate::Keep);
        }

        let percentage = session.correct_count as f64 / session.question_count as f64 * 100.0;
        let elapsed = Utc::now() - session.started_at;
        tracing::info!(
            user_id = %session.user_id,
            correct = session.correct_count,
            total = session.question_count,
            seconds = elapsed.num_seconds(),
            "interview finished"
        );
        reply.push_str(&format!(
            "\n\nInterview finished! You answered {} of {} questions correctly ({:.1}%).\nResult: {}.",
            session.correct_count, session.question_count, percentage, grade_band(percentage)
        ));
        (reply, SessionFate::Discard)
    }
}

fn format_prompt(question: &Question, number: u32) -> String {
    let mut prompt = format!(
        "Question {}/{} from {} ({}):\n\n{}\n\n",
        number, QUESTION_QUOTA, question.category, question.level, question.question
    );
    for option in &question.answers {
        prompt.push_str(&format!("{}. {}\n", option.answer_id, option.answer_text));
    }
    if let Some(theme) = question.theme.as_deref() {
        prompt.push_str(&format!("\nTopic: {}", theme));
    }
    if let Some(hint) = question.hint.as_deref() {
        prompt.push_str(&format!("\nHint: {}", hint));
    }
    prompt.push_str("\n\nReply with the number of your answer or the answer text.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::{Category, QuestionGroup};
    use crate::models::question::{AnswerOption, Level};

    fn single_question_catalog() -> Arc<QuestionCatalog> {
        Arc::new(QuestionCatalog::new(vec![Category {
            name: "backend".to_string(),
            groups: vec![QuestionGroup {
                level: Level::Middle,
                questions: vec![Question {
                    question: "What is Docker?".to_string(),
                    answers: vec![
                        AnswerOption {
                            answer_id: 1,
                            answer_text: "Containerization".to_string(),
                        },
                        AnswerOption {
                            answer_id: 2,
                            answer_text: "A service".to_string(),
                        },
                    ],
                    correct_answer_id: Some(1),
                    hint: Some("Think ships".to_string()),
                    theme: Some("infrastructure".to_string()),
                    category: "backend".to_string(),
                    level: Level::Middle,
                }],
            }],
        }]))
    }

    fn service(catalog: Arc<QuestionCatalog>) -> InterviewService {
        InterviewService::new(catalog, SessionService::new())
    }

    #[test]
    fn grade_band_boundaries() {
        assert_eq!(grade_band(100.0), "excellent");
        assert_eq!(grade_band(90.0), "excellent");
        assert_eq!(grade_band(89.9), "good");
        assert_eq!(grade_band(70.0), "good");
        assert_eq!(grade_band(69.9), "satisfactory");
        assert_eq!(grade_band(50.0), "satisfactory");
        assert_eq!(grade_band(49.9), "needs improvement");
        assert_eq!(grade_band(0.0), "needs improvement");
    }

    #[tokio::test]
    async fn first_message_asks_a_question_with_progress() {
        let svc = service(single_question_catalog());
        let reply = svc.handle_message("u1", "hello").await;
        assert!(reply.contains("1/3"), "{}", reply);
        assert!(reply.contains("What is Docker?"));
        assert!(reply.contains("1. Containerization"));
        assert!(reply.contains("Topic: infrastructure"));
        assert!(reply.contains("Hint: Think ships"));

        let slot = svc.sessions().get("u1").expect("session exists");
        assert!(slot.lock().unwrap().pending.is_some());
    }

    #[tokio::test]
    async fn full_interview_deletes_session_and_reports_results() {
        let svc = service(single_question_catalog());

        for round in 1..=2 {
            let prompt = svc.handle_message("u1", "next").await;
            assert!(prompt.contains(&format!("{}/3", round)), "{}", prompt);
            let feedback = svc.handle_message("u1", "1").await;
            assert!(feedback.contains("Correct!"), "{}", feedback);
            assert!(feedback.contains(&format!("({}/3 answered)", round)));
            assert!(!feedback.contains("Interview finished"));
        }

        let prompt = svc.handle_message("u1", "next").await;
        assert!(prompt.contains("3/3"), "{}", prompt);
        let last = svc.handle_message("u1", "2").await;
        assert!(last.contains("Interview finished!"), "{}", last);
        assert!(last.contains("2 of 3"));
        assert!(last.contains("(66.7%)"));
        assert!(last.contains("satisfactory"));

        assert!(svc.sessions().get("u1").is_none(), "session must be gone");

        // The next message starts a fresh interview.
        let reply = svc.handle_message("u1", "again").await;
        assert!(reply.contains("1/3"), "{}", reply);
    }

    #[tokio::test]
    async fn all_correct_scores_excellent() {
        let svc = service(single_question_catalog());
        let mut last = String::new();
        for _ in 0..3 {
            svc.handle_message("u1", "go").await;
            last = svc.handle_message("u1", "Containerization").await;
        }
        assert!(last.contains("3 of 3"), "{}", last);
        assert!(last.contains("(100.0%)"));
        assert!(last.contains("excellent"));
    }

    #[tokio::test]
    async fn empty_catalog_always_returns_fixed_failure() {
        let svc = service(Arc::new(QuestionCatalog::default()));
        for _ in 0..3 {
            let reply = svc.handle_message("u1", "hello").await;
            assert_eq!(reply, MSG_NO_QUESTIONS);
        }
        let slot = svc.sessions().get("u1").expect("session exists");
        let session = slot.lock().unwrap();
        assert!(session.pending.is_none());
        assert_eq!(session.question_count, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_messages_for_one_user_never_lose_or_duplicate_increments() {
        let svc = service(single_question_catalog());

        let mut handles = Vec::new();
        for i in 0..50 {
            let svc = svc.clone();
            // Alternate question-requesting and answer-shaped messages.
            let text = if i % 2 == 0 { "next".to_string() } else { "1".to_string() };
            handles.push(tokio::spawn(
                async move { svc.handle_message("u1", &text).await },
            ));
        }

        let mut prompts = 0u32;
        let mut graded = 0u32;
        let mut summaries = 0u32;
        for handle in handles {
            let reply = handle.await.unwrap();
            if reply.contains("Reply with the number") {
                prompts += 1;
            }
            if reply.contains("answered)") {
                graded += 1;
            }
            if reply.contains("Interview finished!") {
                summaries += 1;
            }
        }

        assert_eq!(prompts + graded, 50);
        assert!(graded <= prompts, "graded {} prompts {}", graded, prompts);
        assert_eq!(summaries, graded / QUESTION_QUOTA);

        match svc.sessions().get("u1") {
            Some(slot) => {
                let session = slot.lock().unwrap();
                assert_eq!(session.question_count, graded % QUESTION_QUOTA);
            }
            None => assert_eq!(graded % QUESTION_QUOTA, 0),
        }
    }
}
