//! `PostgreSQL` storage backend.
//!
//! Schema lives in `migrations/`; ids are `BIGSERIAL` and both timestamps
//! default to `now()`, so the store assigns them on insert.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument, warn};

use crate::config::PostgresStorageConfig;
use crate::domain::{Answer, NewAnswer, Question, QuestionDto, QuestionWithAnswers};
use crate::error::{StorageError, StorageResult};
use crate::storage::Deadline;
use crate::storage::traits::{
    AnswerCreator, AnswerDeleter, AnswerFetcher, QuestionCreator, QuestionDeleter,
    QuestionFetcher, QuestionLister, Storage,
};

const QUESTION_COLUMNS: &str = "id, text, created_at, updated_at";
const ANSWER_COLUMNS: &str = "id, question_id, user_id, text, created_at, updated_at";

/// `PostgreSQL` storage implementation.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect to the database, retrying while it comes up.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` once every attempt has failed.
    #[instrument(skip(config), fields(max_connections = config.max_connections))]
    pub async fn connect(config: &PostgresStorageConfig) -> StorageResult<Self> {
        let attempts = config.connect_retries.max(1);

        for attempt in 1..=attempts {
            match pool_options(config).connect(&config.url).await {
                Ok(pool) => {
                    info!(attempt, "Connected to PostgreSQL");
                    return Ok(Self { pool });
                }
                Err(err) if attempt < attempts => {
                    warn!(attempt, error = %err, "PostgreSQL connection failed, retrying");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                Err(err) => {
                    return Err(StorageError::Unavailable(format!(
                        "gave up after {attempts} attempts: {err}"
                    )));
                }
            }
        }

        Err(StorageError::Unavailable("no connection attempt made".to_string()))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations from the configured directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the migrations cannot be read or applied.
    #[instrument(skip(self, config), fields(path = %config.migrations_path.display()))]
    pub async fn migrate(&self, config: &PostgresStorageConfig) -> StorageResult<()> {
        let migrator = Migrator::new(config.migrations_path.clone()).await?;
        migrator.run(&self.pool).await?;
        info!("Migrations applied");
        Ok(())
    }
}

fn pool_options(config: &PostgresStorageConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .max_lifetime(Some(config.max_lifetime()))
}

/// Collapse driver errors into the storage contract.
fn classify(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => StorageError::NotFound,
        other => StorageError::Database(other),
    }
}

#[async_trait]
impl QuestionLister for PgStorage {
    async fn list_questions(&self, deadline: Deadline) -> StorageResult<Vec<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id");
        deadline
            .bound(async {
                sqlx::query_as::<_, Question>(&sql)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)
            })
            .await
    }
}

#[async_trait]
impl QuestionCreator for PgStorage {
    async fn create_question(
        &self,
        deadline: Deadline,
        dto: &QuestionDto,
    ) -> StorageResult<Question> {
        let sql = format!("INSERT INTO questions (text) VALUES ($1) RETURNING {QUESTION_COLUMNS}");
        deadline
            .bound(async {
                sqlx::query_as::<_, Question>(&sql)
                    .bind(&dto.text)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(classify)
            })
            .await
    }
}

#[async_trait]
impl QuestionFetcher for PgStorage {
    async fn get_question(&self, deadline: Deadline, id: i64) -> StorageResult<QuestionWithAnswers> {
        let question_sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        let answers_sql = format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE question_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );

        deadline
            .bound(async {
                let question = sqlx::query_as::<_, Question>(&question_sql)
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(classify)?;

                let answers = sqlx::query_as::<_, Answer>(&answers_sql)
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)?;

                Ok(QuestionWithAnswers { question, answers })
            })
            .await
    }
}

#[async_trait]
impl QuestionDeleter for PgStorage {
    async fn delete_question(&self, deadline: Deadline, id: i64) -> StorageResult<()> {
        deadline
            .bound(async {
                let result = sqlx::query("DELETE FROM questions WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(classify)?;

                if result.rows_affected() == 0 {
                    return Err(StorageError::NotFound);
                }
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl AnswerFetcher for PgStorage {
    async fn get_answer(&self, deadline: Deadline, id: i64) -> StorageResult<Answer> {
        let sql = format!("SELECT {ANSWER_COLUMNS} FROM answers WHERE id = $1");
        deadline
            .bound(async {
                sqlx::query_as::<_, Answer>(&sql)
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(classify)
            })
            .await
    }
}

#[async_trait]
impl AnswerCreator for PgStorage {
    async fn create_answer(
        &self,
        deadline: Deadline,
        question_id: i64,
        new: &NewAnswer,
    ) -> StorageResult<Answer> {
        let sql = format!(
            "INSERT INTO answers (question_id, user_id, text) VALUES ($1, $2, $3) \
             RETURNING {ANSWER_COLUMNS}"
        );

        deadline
            .bound(async {
                sqlx::query_as::<_, Answer>(&sql)
                    .bind(question_id)
                    .bind(new.user_id)
                    .bind(&new.text)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(classify)
            })
            .await
    }
}

#[async_trait]
impl AnswerDeleter for PgStorage {
    async fn delete_answer(&self, deadline: Deadline, id: i64) -> StorageResult<()> {
        deadline
            .bound(async {
                let result = sqlx::query("DELETE FROM answers WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(classify)?;

                if result.rows_affected() == 0 {
                    return Err(StorageError::NotFound);
                }
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(StorageError::Database)
    }

    fn backend_name(&self) -> &'static str {
        "postgresql"
    }
}
