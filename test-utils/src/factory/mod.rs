//! Factory methods for creating test data.
//!
//! This module provides factory methods for inserting test entities with sensible
//! defaults, reducing boilerplate in tests. Each entity has a `*Factory` builder for
//! customization and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let learner = factory::user::create_learner(&db).await?;
//! let (instructor, course, section, lesson) =
//!     factory::helpers::create_published_course_with_lesson(&db).await?;
//! let enrollment = factory::enrollment::create_enrollment(&db, learner.id, course.id).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .email("root@example.com")
//!     .role("admin")
//!     .build()
//!     .await?;
//! ```

pub mod chat;
pub mod course;
pub mod download;
pub mod enrollment;
pub mod helpers;
pub mod lesson;
pub mod resource;
pub mod review;
pub mod section;
pub mod user;

pub use course::{create_course, create_published_course};
pub use enrollment::create_enrollment;
pub use lesson::create_lesson;
pub use resource::create_resource;
pub use section::create_section;
pub use user::{create_admin, create_instructor, create_learner, create_user};
