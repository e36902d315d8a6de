//! Typed quiz collections on top of the key-value facade.
//!
//! Each collection is one JSON array under its well-known key. Every edit
//! loads the current list, changes it, and writes the whole list back.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::application::store::KeyValueStore;
use crate::domain::{default_questions, default_topics, Collection, Question, Topic};
use crate::error::{CatalogError, Result};

/// Question, topic, and class lists of the quiz admin.
#[derive(Debug, Clone)]
pub struct QuizCatalog {
    store: Arc<KeyValueStore>,
}

impl QuizCatalog {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Load a list, recovering from the local backup when the primary
    /// backend has nothing.
    ///
    /// A list found only in the local backup is written back so both
    /// backends agree again.
    async fn load<T>(&self, collection: Collection) -> Option<Vec<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        let key = collection.key();
        if let Some(list) = self.store.get_as::<Vec<T>>(key).await {
            return Some(list);
        }
        if !self.store.mode().is_remote() {
            return None;
        }

        let backup = self.store.local_snapshot(key)?;
        let list: Vec<T> = serde_json::from_value(backup).ok()?;
        info!(collection = %collection, items = list.len(), "Restoring list from local backup");
        self.store.set_as(key, &list).await;
        Some(list)
    }

    async fn save<T: Serialize>(&self, collection: Collection, list: &[T]) -> Result<()> {
        if self.store.set_as(collection.key(), list).await {
            Ok(())
        } else {
            Err(CatalogError::PersistFailed {
                key: collection.key(),
            }
            .into())
        }
    }

    // ------------------------------------------------------------------
    // Questions
    // ------------------------------------------------------------------

    /// Stored questions, or an empty list.
    pub async fn questions(&self) -> Vec<Question> {
        self.load(Collection::Questions).await.unwrap_or_default()
    }

    /// Append a question. Returns the new question count.
    pub async fn add_question(&self, question: Question) -> Result<usize> {
        let mut questions = self.questions().await;
        questions.push(question);
        self.save(Collection::Questions, &questions).await?;
        Ok(questions.len())
    }

    pub async fn update_question(&self, index: usize, question: Question) -> Result<()> {
        let mut questions = self.questions().await;
        let len = questions.len();
        let slot = questions
            .get_mut(index)
            .ok_or(CatalogError::IndexOutOfRange { index, len })?;
        *slot = question;
        self.save(Collection::Questions, &questions).await
    }

    /// Delete the question at `index` and return it.
    pub async fn delete_question(&self, index: usize) -> Result<Question> {
        let mut questions = self.questions().await;
        if index >= questions.len() {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: questions.len(),
            }
            .into());
        }
        let removed = questions.remove(index);
        self.save(Collection::Questions, &questions).await?;
        Ok(removed)
    }

    /// Order questions by topic, keeping the relative order within a topic.
    pub async fn sort_questions_by_topic(&self) -> Result<()> {
        let mut questions = self.questions().await;
        questions.sort_by(|a, b| a.topic.cmp(&b.topic));
        self.save(Collection::Questions, &questions).await
    }

    /// Replace all questions with the built-in bank. Returns the new count.
    pub async fn reset_questions(&self) -> Result<usize> {
        let questions = default_questions();
        self.save(Collection::Questions, &questions).await?;
        Ok(questions.len())
    }

    pub async fn clear_questions(&self) -> Result<()> {
        self.save::<Question>(Collection::Questions, &[]).await
    }

    /// Pretty-printed JSON of all questions.
    pub async fn export_questions(&self) -> Result<String> {
        let questions = self.questions().await;
        if questions.is_empty() {
            return Err(CatalogError::NothingToExport.into());
        }
        Ok(serde_json::to_string_pretty(&questions)?)
    }

    /// Replace all questions with those in `json`, which must be an array.
    /// Returns the number imported.
    pub async fn import_questions(&self, json: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CatalogError::InvalidImport(format!("not valid JSON: {e}")))?;
        if !value.is_array() {
            return Err(
                CatalogError::InvalidImport("expected a JSON array of questions".into()).into(),
            );
        }
        let questions: Vec<Question> = serde_json::from_value(value)
            .map_err(|e| CatalogError::InvalidImport(e.to_string()))?;
        self.save(Collection::Questions, &questions).await?;
        Ok(questions.len())
    }

    // ------------------------------------------------------------------
    // Topics
    // ------------------------------------------------------------------

    /// Stored topics. The default topics are seeded on first use.
    pub async fn topics(&self) -> Vec<Topic> {
        if let Some(topics) = self.load(Collection::Topics).await {
            return topics;
        }
        let topics = default_topics();
        if self.store.set_as(Collection::Topics.key(), &topics).await {
            info!(count = topics.len(), "Seeded default topics");
        }
        topics
    }

    /// Add a topic. Names are unique ignoring case.
    pub async fn add_topic(&self, name: &str, description: &str) -> Result<Topic> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName { what: "topic" }.into());
        }

        let mut topics = self.topics().await;
        if topics.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(CatalogError::Duplicate {
                what: "topic",
                name: name.to_string(),
            }
            .into());
        }

        let topic = Topic::new(name, description.trim());
        topics.push(topic.clone());
        self.save(Collection::Topics, &topics).await?;
        Ok(topic)
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    /// Stored class names. An empty list is persisted on first use.
    pub async fn classes(&self) -> Vec<String> {
        if let Some(classes) = self.load(Collection::Classes).await {
            return classes;
        }
        self.store
            .set_as(Collection::Classes.key(), &Vec::<String>::new())
            .await;
        Vec::new()
    }

    /// Add a class. Returns the trimmed name that was stored.
    pub async fn add_class(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName { what: "class" }.into());
        }

        let mut classes = self.classes().await;
        if classes.iter().any(|c| c == name) {
            return Err(CatalogError::Duplicate {
                what: "class",
                name: name.to_string(),
            }
            .into());
        }

        classes.push(name.to_string());
        self.save(Collection::Classes, &classes).await?;
        Ok(name.to_string())
    }

    pub async fn remove_class(&self, name: &str) -> Result<()> {
        let mut classes = self.classes().await;
        let Some(index) = classes.iter().position(|c| c == name) else {
            return Err(CatalogError::NotFound {
                what: "class",
                name: name.to_string(),
            }
            .into());
        };
        classes.remove(index);
        self.save(Collection::Classes, &classes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::local::MemoryStorage;
    use crate::error::Error;

    fn catalog() -> QuizCatalog {
        QuizCatalog::new(Arc::new(KeyValueStore::local_only(Arc::new(
            MemoryStorage::new(),
        ))))
    }

    fn question(topic: &str, text: &str) -> Question {
        Question {
            question: text.to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct: 0,
            topic: topic.to_string(),
            explanation: String::new(),
            image: None,
        }
    }

    #[tokio::test]
    async fn topics_are_seeded_once() {
        let catalog = catalog();
        assert_eq!(catalog.topics().await.len(), 8);
        assert!(catalog.store().exists(Collection::Topics.key()).await);

        catalog.add_topic("Trigonometry", "Angles").await.unwrap();
        assert_eq!(catalog.topics().await.len(), 9);
    }

    #[tokio::test]
    async fn topic_names_are_unique_ignoring_case() {
        let catalog = catalog();
        let err = catalog.add_topic("algebra", "").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Catalog(CatalogError::Duplicate { what: "topic", .. })
        ));
        assert!(matches!(
            catalog.add_topic("   ", "").await.unwrap_err(),
            Error::Catalog(CatalogError::EmptyName { .. })
        ));
    }

    #[tokio::test]
    async fn classes_start_empty_and_reject_duplicates() {
        let catalog = catalog();
        assert!(catalog.classes().await.is_empty());
        assert!(catalog.store().exists(Collection::Classes.key()).await);

        assert_eq!(catalog.add_class("  7A ").await.unwrap(), "7A");
        assert!(catalog.add_class("7A").await.is_err());
        catalog.add_class("7B").await.unwrap();
        assert_eq!(catalog.classes().await, vec!["7A", "7B"]);

        catalog.remove_class("7A").await.unwrap();
        assert_eq!(catalog.classes().await, vec!["7B"]);
        assert!(matches!(
            catalog.remove_class("7A").await.unwrap_err(),
            Error::Catalog(CatalogError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn question_edits_persist() {
        let catalog = catalog();
        assert_eq!(catalog.add_question(question("Geometry", "q1")).await.unwrap(), 1);
        assert_eq!(catalog.add_question(question("Algebra", "q2")).await.unwrap(), 2);

        catalog
            .update_question(0, question("Geometry", "q1 edited"))
            .await
            .unwrap();
        assert_eq!(catalog.questions().await[0].question, "q1 edited");

        let removed = catalog.delete_question(1).await.unwrap();
        assert_eq!(removed.question, "q2");
        assert!(matches!(
            catalog.delete_question(5).await.unwrap_err(),
            Error::Catalog(CatalogError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[tokio::test]
    async fn sort_is_stable_by_topic() {
        let catalog = catalog();
        for (topic, text) in [("b", "1"), ("a", "2"), ("b", "3"), ("a", "4")] {
            catalog.add_question(question(topic, text)).await.unwrap();
        }
        catalog.sort_questions_by_topic().await.unwrap();
        let order: Vec<String> = catalog
            .questions()
            .await
            .into_iter()
            .map(|q| q.question)
            .collect();
        assert_eq!(order, vec!["2", "4", "1", "3"]);
    }

    #[tokio::test]
    async fn export_and_import() {
        let catalog = catalog();
        assert!(matches!(
            catalog.export_questions().await.unwrap_err(),
            Error::Catalog(CatalogError::NothingToExport)
        ));

        let count = catalog.reset_questions().await.unwrap();
        let exported = catalog.export_questions().await.unwrap();

        catalog.clear_questions().await.unwrap();
        assert!(catalog.questions().await.is_empty());

        assert_eq!(catalog.import_questions(&exported).await.unwrap(), count);
        assert_eq!(catalog.questions().await, default_questions());
    }

    #[tokio::test]
    async fn import_rejects_non_arrays() {
        let catalog = catalog();
        for bad in [r#"{"question":"x"}"#, "nope", r#"[{"question":1}]"#] {
            assert!(matches!(
                catalog.import_questions(bad).await.unwrap_err(),
                Error::Catalog(CatalogError::InvalidImport(_))
            ));
        }
    }

    #[tokio::test]
    async fn persist_failure_is_reported() {
        let catalog = QuizCatalog::new(Arc::new(KeyValueStore::local_only(Arc::new(
            MemoryStorage::with_quota(10),
        ))));
        assert!(matches!(
            catalog.add_class("7A").await.unwrap_err(),
            Error::Catalog(CatalogError::PersistFailed { .. })
        ));
    }
}
