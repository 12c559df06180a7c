//! Domain models for the question/answer board.
//!
//! Persisted entities, the composite read view, and the input DTOs accepted
//! at the HTTP boundary.

pub mod answer;
pub mod dto;
pub mod question;

pub use answer::{Answer, NewAnswer};
pub use dto::{AnswerDto, Dto, MessageResponse, QuestionDto};
pub use question::{Question, QuestionWithAnswers};
