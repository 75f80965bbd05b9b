use crate::models::question::{Level, Question};

/// One source grouping inside a category: all questions that came from a
/// single difficulty file, already flattened.
#[derive(Debug, Clone)]
pub struct QuestionGroup {
    pub level: Level,
    pub questions: Vec<Question>,
}

impl QuestionGroup {
    pub fn selectable(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.is_selectable())
    }

    pub fn has_selectable(&self) -> bool {
        self.questions.iter().any(|q| q.is_selectable())
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub groups: Vec<QuestionGroup>,
}

impl Category {
    pub fn questions_in(&self, level: Option<Level>) -> impl Iterator<Item = &Question> {
        self.groups
            .iter()
            .filter(move |g| level.map_or(true, |l| g.level == l))
            .flat_map(|g| g.questions.iter())
    }

    pub fn has_selectable(&self) -> bool {
        self.groups.iter().any(|g| g.has_selectable())
    }
}

/// Read-only collection of categories, loaded once at startup and shared
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    categories: Vec<Category>,
}

impl QuestionCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.questions_in(None).count())
            .sum()
    }
}
