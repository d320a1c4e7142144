use crate::server::{
    data::resource::ResourceRepository,
    model::resource::{CreateResourceParams, ResourceSearch, ResourceType},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod search;
