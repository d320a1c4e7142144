//! Learning Sphere Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the
//! Learning Sphere backend. This crate offers a builder pattern for creating test contexts
//! with in-memory SQLite databases and factories for inserting test rows.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **factory**: Builders that insert entities with sensible defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_course_operations() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_course_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let instructor = factory::user::create_instructor(db).await?;
//!     let course = factory::course::create_course(db, instructor.id).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
