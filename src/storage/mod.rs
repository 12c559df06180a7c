//! Storage layer module.
//!
//! Narrow per-operation traits over a relational store. Every backend
//! reports a missing row as [`StorageError::NotFound`] and an expired
//! request deadline as [`StorageError::DeadlineExceeded`]; telling which
//! entity was missing is left to the service layer.
//!
//! [`StorageError::NotFound`]: crate::error::StorageError::NotFound
//! [`StorageError::DeadlineExceeded`]: crate::error::StorageError::DeadlineExceeded

pub mod deadline;
pub mod factory;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use deadline::Deadline;
pub use factory::create_storage;
pub use memory::MemoryStorage;
pub use postgres::PgStorage;
pub use traits::{
    AnswerCreator, AnswerDeleter, AnswerFetcher, AnswerStorage, QuestionCreator,
    QuestionDeleter, QuestionFetcher, QuestionLister, QuestionStorage, Storage,
};
