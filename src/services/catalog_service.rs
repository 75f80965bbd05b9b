use std::path::Path;

use serde_json::Value as JsonValue;
use tokio::fs;

use crate::models::category::{Category, QuestionCatalog, QuestionGroup};
use crate::models::question::{Level, Question};

/// Loads the question catalog from a directory tree:
/// `<root>/<category>/<level>.json`, where each file holds a JSON array of
/// question groups and each group is an array of question objects.
pub struct CatalogService;

impl CatalogService {
    /// Scans the question source once. Malformed files and entries are
    /// dropped with a diagnostic; an unreadable root yields an empty
    /// catalog rather than an error, so the server can still start and
    /// answer with a fixed failure message.
    pub async fn load_from_dir(root: &Path) -> QuestionCatalog {
        let mut categories = Vec::new();

        let mut entries = match fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "question source unreadable");
                return QuestionCatalog::default();
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match Self::load_category(&path, &name).await {
                Some(category) => categories.push(category),
                None => {
                    tracing::warn!(category = %name, "category contributed no questions");
                }
            }
        }

        categories.sort_by(|a, b| a.name.cmp(&b.name));
        QuestionCatalog::new(categories)
    }

    async fn load_category(dir: &Path, name: &str) -> Option<Category> {
        let mut groups = Vec::new();

        let mut entries = fs::read_dir(dir).await.ok()?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let level = Level::from_file_stem(stem);

            let questions = Self::load_group_file(&path, name, level).await;
            if !questions.is_empty() {
                groups.push(QuestionGroup { level, questions });
            }
        }

        if groups.is_empty() {
            return None;
        }
        groups.sort_by_key(|g| g.level.as_str());
        Some(Category {
            name: name.to_string(),
            groups,
        })
    }

    /// Parses one difficulty file: an array of question groups, flattened
    /// into a single list. Entries that fail to deserialize or lack
    /// required fields are skipped.
    async fn load_group_file(path: &Path, category: &str, level: Level) -> Vec<Question> {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable question file");
                return Vec::new();
            }
        };

        let groups: Vec<Vec<JsonValue>> = match serde_json::from_str(&raw) {
            Ok(groups) => groups,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping malformed question file");
                return Vec::new();
            }
        };

        let mut questions = Vec::new();
        for value in groups.into_iter().flatten() {
            match serde_json::from_value::<Question>(value) {
                Ok(mut q) if !q.question.trim().is_empty() && !q.answers.is_empty() => {
                    q.category = category.to_string();
                    q.level = level;
                    questions.push(q);
                }
                Ok(_) => {
                    tracing::warn!(file = %path.display(), "dropping question with empty text or no answers");
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "dropping malformed question entry");
                }
            }
        }
        questions
    }
}
