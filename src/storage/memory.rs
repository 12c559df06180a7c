//! In-process storage backend.
//!
//! Keeps both tables in ordered maps behind a single lock, assigning ids and
//! timestamps the way the relational schema does. Answers are tied to their
//! question the same way the `answers.question_id` foreign key is: creation
//! under a missing question fails, and deleting a question removes its answers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{Answer, NewAnswer, Question, QuestionDto, QuestionWithAnswers};
use crate::error::{StorageError, StorageResult};
use crate::storage::Deadline;
use crate::storage::traits::{
    AnswerCreator, AnswerDeleter, AnswerFetcher, QuestionCreator, QuestionDeleter,
    QuestionFetcher, QuestionLister, Storage,
};

#[derive(Debug, Default)]
struct Tables {
    questions: BTreeMap<i64, Question>,
    answers: BTreeMap<i64, Answer>,
    question_seq: i64,
    answer_seq: i64,
}

/// Memory-backed storage implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionLister for MemoryStorage {
    async fn list_questions(&self, deadline: Deadline) -> StorageResult<Vec<Question>> {
        deadline.check()?;
        Ok(self.tables.read().questions.values().cloned().collect())
    }
}

#[async_trait]
impl QuestionCreator for MemoryStorage {
    async fn create_question(
        &self,
        deadline: Deadline,
        dto: &QuestionDto,
    ) -> StorageResult<Question> {
        deadline.check()?;

        let mut tables = self.tables.write();
        tables.question_seq += 1;
        let now = Utc::now();
        let question = Question {
            id: tables.question_seq,
            text: dto.text.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.questions.insert(question.id, question.clone());

        Ok(question)
    }
}

#[async_trait]
impl QuestionFetcher for MemoryStorage {
    async fn get_question(&self, deadline: Deadline, id: i64) -> StorageResult<QuestionWithAnswers> {
        deadline.check()?;

        let tables = self.tables.read();
        let question = tables
            .questions
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)?;

        let mut answers: Vec<Answer> = tables
            .answers
            .values()
            .filter(|answer| answer.question_id == id)
            .cloned()
            .collect();
        answers.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(QuestionWithAnswers { question, answers })
    }
}

#[async_trait]
impl QuestionDeleter for MemoryStorage {
    async fn delete_question(&self, deadline: Deadline, id: i64) -> StorageResult<()> {
        deadline.check()?;

        let mut tables = self.tables.write();
        if tables.questions.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        // ON DELETE CASCADE
        tables.answers.retain(|_, answer| answer.question_id != id);

        Ok(())
    }
}

#[async_trait]
impl AnswerFetcher for MemoryStorage {
    async fn get_answer(&self, deadline: Deadline, id: i64) -> StorageResult<Answer> {
        deadline.check()?;

        self.tables
            .read()
            .answers
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl AnswerCreator for MemoryStorage {
    async fn create_answer(
        &self,
        deadline: Deadline,
        question_id: i64,
        new: &NewAnswer,
    ) -> StorageResult<Answer> {
        deadline.check()?;

        let mut tables = self.tables.write();
        if !tables.questions.contains_key(&question_id) {
            return Err(StorageError::NotFound);
        }

        tables.answer_seq += 1;
        let now = Utc::now();
        let answer = Answer {
            id: tables.answer_seq,
            question_id,
            user_id: new.user_id,
            text: new.text.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.answers.insert(answer.id, answer.clone());

        Ok(answer)
    }
}

#[async_trait]
impl AnswerDeleter for MemoryStorage {
    async fn delete_answer(&self, deadline: Deadline, id: i64) -> StorageResult<()> {
        deadline.check()?;

        self.tables
            .write()
            .answers
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;
    use uuid::Uuid;

    fn question(text: &str) -> QuestionDto {
        QuestionDto {
            text: text.to_string(),
        }
    }

    fn answer(text: &str) -> NewAnswer {
        NewAnswer {
            user_id: Uuid::new_v4(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let storage = MemoryStorage::new();
        let first = storage
            .create_question(Deadline::none(), &question("why?"))
            .await
            .unwrap();
        let second = storage
            .create_question(Deadline::none(), &question("how?"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.text, "why?");
        assert_eq!(first.created_at, first.updated_at);

        let all = storage.list_questions(Deadline::none()).await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.list_questions(Deadline::none()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_question_with_answers_in_creation_order() {
        let storage = MemoryStorage::new();
        let q = storage
            .create_question(Deadline::none(), &question("why?"))
            .await
            .unwrap();
        let a1 = storage
            .create_answer(Deadline::none(), q.id, &answer("because"))
            .await
            .unwrap();
        let a2 = storage
            .create_answer(Deadline::none(), q.id, &answer("why not"))
            .await
            .unwrap();

        let view = storage.get_question(Deadline::none(), q.id).await.unwrap();
        assert_eq!(view.question, q);
        assert_eq!(view.answers, vec![a1, a2]);
    }

    #[tokio::test]
    async fn test_answer_requires_existing_question() {
        let storage = MemoryStorage::new();
        let result = storage
            .create_answer(Deadline::none(), 42, &answer("orphan"))
            .await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let storage = MemoryStorage::new();
        let q = storage
            .create_question(Deadline::none(), &question("why?"))
            .await
            .unwrap();

        storage.delete_question(Deadline::none(), q.id).await.unwrap();
        assert!(matches!(
            storage.delete_question(Deadline::none(), q.id).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            storage.get_question(Deadline::none(), q.id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_question_removes_its_answers() {
        let storage = MemoryStorage::new();
        let q = storage
            .create_question(Deadline::none(), &question("why?"))
            .await
            .unwrap();
        let a = storage
            .create_answer(Deadline::none(), q.id, &answer("because"))
            .await
            .unwrap();

        storage.delete_question(Deadline::none(), q.id).await.unwrap();
        assert!(matches!(
            storage.get_answer(Deadline::none(), a.id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_answer() {
        let storage = MemoryStorage::new();
        let q = storage
            .create_question(Deadline::none(), &question("why?"))
            .await
            .unwrap();
        let a = storage
            .create_answer(Deadline::none(), q.id, &answer("because"))
            .await
            .unwrap();

        assert_eq!(storage.get_answer(Deadline::none(), a.id).await.unwrap(), a);
        storage.delete_answer(Deadline::none(), a.id).await.unwrap();
        assert!(matches!(
            storage.delete_answer(Deadline::none(), a.id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_expired_deadline() {
        let storage = MemoryStorage::new();
        let expired = Deadline::at(Instant::now());

        assert!(matches!(
            storage.list_questions(expired).await,
            Err(StorageError::DeadlineExceeded)
        ));
        assert!(matches!(
            storage.create_question(expired, &question("late")).await,
            Err(StorageError::DeadlineExceeded)
        ));
        assert!(storage.list_questions(Deadline::none()).await.unwrap().is_empty());
    }
}
