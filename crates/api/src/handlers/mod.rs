//! HTTP request handlers, grouped by resource.

pub mod answer;
pub mod auth;
pub mod notification;
pub mod search;
pub mod topic_page;
