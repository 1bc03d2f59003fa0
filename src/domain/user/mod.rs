pub mod model;
pub mod repository;

pub use model::{normalize_email, Role, User};
pub use repository::UserRepository;
