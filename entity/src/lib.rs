//! SeaORM entity models for the Learning Sphere database.
//!
//! Each module mirrors one table created by the `migration` crate. Nested course
//! content (sections, lessons, resources) is stored in its own table and ordered
//! through an explicit `position` column.

pub mod prelude;

pub mod ai_analytics;
pub mod ai_chat_message;
pub mod ai_chat_session;
pub mod course;
pub mod course_review;
pub mod course_section;
pub mod enrollment;
pub mod lesson;
pub mod resource;
pub mod resource_download;
pub mod user;
pub mod user_achievement;
