pub mod exam_service;
pub mod grading_client;

pub use exam_service::{ExamListing, ExamService};
pub use grading_client::GradingClient;
