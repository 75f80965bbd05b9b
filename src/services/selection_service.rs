use rand::seq::SliceRandom;

use crate::models::category::QuestionCatalog;
use crate::models::question::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no categories available")]
    CatalogUnavailable,

    #[error("no selectable questions available")]
    Exhausted,
}

pub struct SelectionService;

impl SelectionService {
    /// Uniformly picks a category, then a grouping within it, then a
    /// question within that grouping. Candidates are filtered to entries
    /// that can actually be graded before each pick, so a catalog of
    /// entirely malformed questions reports exhaustion instead of looping.
    pub fn select_random(catalog: &QuestionCatalog) -> Result<Question, SelectionError> {
        if catalog.is_empty() {
            return Err(SelectionError::CatalogUnavailable);
        }

        let mut rng = rand::thread_rng();

        let candidates: Vec<_> = catalog
            .categories()
            .iter()
            .filter(|c| c.has_selectable())
            .collect();
        let category = candidates
            .choose(&mut rng)
            .ok_or(SelectionError::Exhausted)?;

        let groups: Vec<_> = category
            .groups
            .iter()
            .filter(|g| g.has_selectable())
            .collect();
        let group = groups.choose(&mut rng).ok_or(SelectionError::Exhausted)?;

        let questions: Vec<_> = group.selectable().collect();
        let question = questions
            .choose(&mut rng)
            .ok_or(SelectionError::Exhausted)?;

        Ok((*question).clone())
    }
}
