//! Feedback: customer comments, editable only by their author.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{Feedback, FeedbackId, NewFeedback};
pub use repository::{FeedbackRepository, HttpFeedbackRepository};
pub use service::{FeedbackService, FeedbackServiceError};
