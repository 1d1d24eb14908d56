//! Entity models and request/response DTOs.

pub mod answer;
pub mod notification;
pub mod question;
pub mod related_link;
pub mod topic;
pub mod topic_page;
pub mod user;
