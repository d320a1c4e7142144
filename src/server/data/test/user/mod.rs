use crate::server::{
    data::user::UserRepository,
    model::user::{ApplicationStatus, CreateUserParams, Role, UserFilter},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod application;
mod create;
mod get_paginated;
mod reset_token;
mod set_active;
