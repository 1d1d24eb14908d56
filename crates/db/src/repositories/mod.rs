//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod answer_repo;
pub mod image_repo;
pub mod notification_repo;
pub mod question_repo;
pub mod related_link_repo;
pub mod revision_repo;
pub mod search_repo;
pub mod topic_page_repo;
pub mod topic_repo;
pub mod user_repo;

pub use answer_repo::AnswerRepo;
pub use image_repo::ImageRepo;
pub use notification_repo::NotificationRepo;
pub use question_repo::QuestionRepo;
pub use related_link_repo::RelatedLinkRepo;
pub use revision_repo::RevisionRepo;
pub use search_repo::SearchRepo;
pub use topic_page_repo::TopicPageRepo;
pub use topic_repo::TopicRepo;
pub use user_repo::UserRepo;
