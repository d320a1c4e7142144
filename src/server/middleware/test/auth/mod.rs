use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AccessToken, AuthGuard, Permission},
    util::jwt::JwtKeys,
};
use test_utils::{builder::TestBuilder, factory};

mod optional;
mod require;

fn keys() -> JwtKeys {
    JwtKeys::new("middleware-test-secret", 1)
}

fn token_for(keys: &JwtKeys, user: &entity::user::Model) -> AccessToken {
    AccessToken(Some(keys.issue(user.id, &user.role).unwrap()))
}
