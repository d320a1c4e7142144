use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{
            AuthResponseDto, ChangePasswordDto, ForgotPasswordDto, ForgotPasswordResponseDto,
            LoginDto, RegisterDto, ResetPasswordDto, UpdateProfileDto,
        },
        user::{AchievementDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard},
        model::user::{RegisterParams, UpdateProfileParams, User},
        service::{auth::AuthService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Reply to every forgot-password request, whether or not the account exists.
const RESET_REQUESTED_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been issued";

/// Register a new learner account.
///
/// Creates the account with the `learner` role and returns a bearer token so the
/// client is signed in immediately.
///
/// # Returns
/// - `201 Created` - Token and the new account
/// - `400 Bad Request` - Invalid fields or the email is already registered
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid registration data or duplicate email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;
    let session = AuthService::new(&state.db, &state.jwt)
        .register(params)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// Sign in with email and password.
///
/// # Returns
/// - `200 OK` - Token and the signed-in account
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `403 Forbidden` - Account has been disabled
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account disabled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.jwt)
        .login(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Get the currently authenticated user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Account disabled", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_me(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(User::from_entity(user)?.into_dto())))
}

/// Update the caller's name, bio or avatar URL.
///
/// Absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = AUTH_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    token: AccessToken,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = UpdateProfileParams::from_dto(payload)?;
    let updated = UserService::new(&state.db)
        .update_profile(user.id, params)
        .await?;

    Ok((StatusCode::OK, Json(updated.into_dto())))
}

/// Change the caller's password.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Current password is wrong or the new one is too short
#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Current password incorrect or new password invalid", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn change_password(
    State(state): State<AppState>,
    token: AccessToken,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.jwt)
        .change_password(&user, &payload.current_password, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Password updated".to_string(),
        }),
    ))
}

/// Request a password reset token.
///
/// The response is identical whether or not the email belongs to an account. The
/// raw token is only included when `RESET_TOKEN_IN_RESPONSE` is enabled.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Reset requested", body = ForgotPasswordResponseDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let token = AuthService::new(&state.db, &state.jwt)
        .forgot_password(&payload.email)
        .await?;

    let reset_token = token.filter(|_| state.reset_token_in_response);

    Ok((
        StatusCode::OK,
        Json(ForgotPasswordResponseDto {
            message: RESET_REQUESTED_MESSAGE.to_string(),
            reset_token,
        }),
    ))
}

/// Set a new password using a reset token.
///
/// Tokens expire after one hour and can only be used once.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageDto),
        (status = 400, description = "Invalid or expired reset token", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.jwt)
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Password has been reset".to_string(),
        }),
    ))
}

/// List the caller's earned achievements, newest first.
#[utoipa::path(
    get,
    path = "/api/auth/achievements",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Earned achievements", body = Vec<AchievementDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_achievements(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let achievements = UserService::new(&state.db)
        .get_achievements(user.id)
        .await?;

    let dtos: Vec<AchievementDto> = achievements.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
