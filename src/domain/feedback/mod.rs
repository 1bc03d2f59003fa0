pub mod model;
pub mod repository;

pub use model::Feedback;
pub use repository::FeedbackRepository;
