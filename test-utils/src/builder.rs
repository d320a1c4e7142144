use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Course, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Course)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using the
    /// SQLite backend syntax. The table is created when `build()` is called.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables that make up a course tree.
    ///
    /// Adds User, Course, CourseSection, Lesson and Resource. Use this for
    /// curriculum and resource library tests.
    pub fn with_course_tables(self) -> Self {
        self.with_table(User)
            .with_table(Course)
            .with_table(CourseSection)
            .with_table(Lesson)
            .with_table(Resource)
    }

    /// Adds the course tree plus learner-facing tables.
    ///
    /// Extends `with_course_tables()` with Enrollment, CourseReview,
    /// ResourceDownload and UserAchievement.
    pub fn with_learning_tables(self) -> Self {
        self.with_course_tables()
            .with_table(Enrollment)
            .with_table(CourseReview)
            .with_table(ResourceDownload)
            .with_table(UserAchievement)
    }

    /// Adds the AI chat tables (AiChatSession, AiChatMessage, AiAnalytics).
    pub fn with_ai_tables(self) -> Self {
        self.with_table(AiChatSession)
            .with_table(AiChatMessage)
            .with_table(AiAnalytics)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_learning_tables().with_ai_tables()
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
