use crate::server::error::AppError;
use test_utils::{builder::TestBuilder, factory};

mod course;
mod download;
mod enrollment;
mod media;
mod user;
