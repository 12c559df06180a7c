//! Service layer module.
//!
//! One free function per operation, each taking only the storage capability
//! it calls. This is the single place where storage outcomes become
//! client-facing errors.

pub mod answers;
pub mod questions;

use crate::error::{AppError, StorageError};

pub use answers::{create_answer, delete_answer, get_answer};
pub use questions::{create_question, delete_question, get_all_questions, get_question_with_answers};

/// What a storage `NotFound` means at a given call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundPolicy {
    /// The question addressed by the call is missing.
    Question,
    /// The answer addressed by the call is missing.
    Answer,
    /// Not-found is not expected here and is treated like any other failure.
    Unclassified,
}

/// Translate a storage failure for a call site with the given policy.
///
/// A passed deadline always becomes a timeout, whatever the policy.
#[must_use]
pub fn translate(err: StorageError, not_found: NotFoundPolicy) -> AppError {
    match (err, not_found) {
        (StorageError::NotFound, NotFoundPolicy::Question) => AppError::QuestionNotFound,
        (StorageError::NotFound, NotFoundPolicy::Answer) => AppError::AnswerNotFound,
        (err @ StorageError::DeadlineExceeded, _) => AppError::deadline(err),
        (err, _) => AppError::internal(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_not_found_follows_policy() {
        assert!(matches!(
            translate(StorageError::NotFound, NotFoundPolicy::Question),
            AppError::QuestionNotFound
        ));
        assert!(matches!(
            translate(StorageError::NotFound, NotFoundPolicy::Answer),
            AppError::AnswerNotFound
        ));
        assert_eq!(
            translate(StorageError::NotFound, NotFoundPolicy::Unclassified).kind(),
            ErrorKind::Unclassified
        );
    }

    #[test]
    fn test_deadline_is_timeout_for_every_policy() {
        for policy in [
            NotFoundPolicy::Question,
            NotFoundPolicy::Answer,
            NotFoundPolicy::Unclassified,
        ] {
            assert!(matches!(
                translate(StorageError::DeadlineExceeded, policy),
                AppError::Timeout { source: Some(_) }
            ));
        }
    }

    #[test]
    fn test_other_errors_are_unclassified() {
        let err = translate(
            StorageError::Unavailable("pool closed".to_string()),
            NotFoundPolicy::Question,
        );
        assert_eq!(err.kind(), ErrorKind::Unclassified);
        assert!(err.cause().unwrap().to_string().contains("pool closed"));
    }
}
