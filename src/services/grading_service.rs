use crate::models::question::Question;

/// Outcome of grading one submitted answer. Built by the evaluator and
/// consumed immediately by the orchestrator, never stored.
#[derive(Debug, Clone)]
pub struct AnswerEvaluation {
    pub correct: bool,
    pub correct_answer: String,
    pub hint: String,
    pub message: String,
}

pub const MSG_CORRECT: &str = "Correct!";
pub const MSG_INCORRECT: &str = "Incorrect.";

pub struct GradingService;

impl GradingService {
    /// Grades a raw answer against a question. A numeric answer is matched
    /// against the correct option's id; anything else is compared to the
    /// correct option's text after trimming and case-folding.
    ///
    /// When `correct_answer_id` matches none of the options the first
    /// option is presumed correct; see DESIGN.md before changing that.
    pub fn evaluate(question: &Question, raw_answer: &str) -> AnswerEvaluation {
        let resolved = question
            .correct_answer_id
            .and_then(|id| question.answers.iter().find(|a| a.answer_id == id))
            .or_else(|| question.answers.first());

        let (correct_id, correct_text) = match resolved {
            Some(option) => (Some(option.answer_id), option.answer_text.clone()),
            None => (None, String::new()),
        };

        let correct = match raw_answer.trim().parse::<i32>() {
            Ok(chosen_id) => Some(chosen_id) == correct_id,
            Err(_) => {
                !correct_text.is_empty()
                    && raw_answer.trim().to_lowercase() == correct_text.trim().to_lowercase()
            }
        };

        AnswerEvaluation {
            correct,
            correct_answer: correct_text,
            hint: question.hint.clone().unwrap_or_default(),
            message: if correct { MSG_CORRECT } else { MSG_INCORRECT }.to_string(),
        }
    }
}
