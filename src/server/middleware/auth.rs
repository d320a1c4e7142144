use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use sea_orm::DatabaseConnection;
use std::convert::Infallible;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::Role,
    util::jwt::JwtKeys,
};

/// Bearer token of the request, if one was sent.
///
/// Extraction never fails so public handlers can accept it too; [`AuthGuard`]
/// decides whether a missing token is an error.
#[derive(Debug, Clone, Default)]
pub struct AccessToken(pub Option<String>);

impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok();

        Ok(Self(header.map(|TypedHeader(auth)| auth.token().to_string())))
    }
}

pub enum Permission {
    /// Admin role.
    Admin,
    /// Instructor or admin role.
    Instructor,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
    token: &'a AccessToken,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtKeys, token: &'a AccessToken) -> Self {
        Self { db, jwt, token }
    }

    /// Resolves the caller on routes that also serve anonymous visitors.
    ///
    /// A missing, invalid or stale token yields `None` instead of an error.
    pub async fn optional(&self) -> Result<Option<entity::user::Model>, AppError> {
        if self.token.0.is_none() {
            return Ok(None);
        }

        match self.require(&[]).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::AuthErr(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Resolves the caller and checks every listed permission.
    ///
    /// An empty permission list admits any authenticated, active user. The user
    /// row is re-read on every request so role changes and disabled accounts take
    /// effect before the token expires.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Authenticated user
    /// - `Err(AppError::AuthErr)` - Missing or invalid token (401), deleted user (401),
    ///   disabled account (403) or missing role (403)
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<entity::user::Model, AppError> {
        let Some(token) = self.token.0.as_deref() else {
            return Err(AuthError::MissingToken.into());
        };

        let claims = self.jwt.verify(token)?;
        let Some(user_id) = claims.user_id() else {
            return Err(AuthError::InvalidToken(format!("Malformed subject '{}'", claims.sub)).into());
        };

        let Some(user) = UserRepository::new(self.db).find_model_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active {
            return Err(AuthError::AccountDisabled(user_id).into());
        }

        let role = Role::parse(&user.role);
        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if role != Some(Role::Admin) {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "Admin role required".to_string(),
                        )
                        .into());
                    }
                }
                Permission::Instructor => {
                    if !role.is_some_and(|r| r.can_teach()) {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "Instructor role required".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }
}
