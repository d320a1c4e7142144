//! Data access layer.
//!
//! One repository per table. Repositories borrow the database connection, speak
//! SeaORM, return `DbErr` and convert entity models into domain models at the
//! boundary. Cross-table rules such as cascades and ownership checks live in the
//! service layer.

pub mod achievement;
pub mod ai;
pub mod course;
pub mod download;
pub mod enrollment;
pub mod lesson;
pub mod resource;
pub mod review;
pub mod section;
pub mod user;

#[cfg(test)]
mod test;
