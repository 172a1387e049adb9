//! Handlers for the `/auth` resource: accounts, password reset and
//! admin-managed invitations.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use folio_core::error::CoreError;
use folio_core::otp::{self, OtpGrant, OtpPurpose};
use folio_core::roles::Role;
use folio_core::types::DbId;
use folio_db::models::user::{CreateUser, User, UserResponse};
use folio_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, temporary_password, validate_password_strength, verify_password,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

const RESET_SUBJECT: &str = "Password Reset OTP";
const INVITE_SUBJECT: &str = "Admin Dashboard Invitation - Set up your password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
///
/// A `role` member is accepted for compatibility and ignored: self-registered
/// accounts always get the `user` role.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Please add a name"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for `POST /auth/forgotpassword`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

/// Request body for `PUT /auth/resetpassword`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `PUT /auth/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// Request body for `POST /auth/invite`. `role` defaults to `admin`.
#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Please add a name"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Successful authentication response returned by register, login and reset.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if let Some(requested) = input.role.as_deref().filter(|r| *r != Role::User.as_str()) {
        tracing::warn!(email = %input.email, requested, "Ignoring requested role on self-registration");
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash,
            role: Role::User,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(Json(token_response(&state, user)?))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(email), Some(password)) = (
        input.email.filter(|e| !e.trim().is_empty()),
        input.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Please provide an email and password".into(),
        ));
    };

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let user = UserRepo::find_by_email(&state.pool, email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    Ok(Json(token_response(&state, user)?))
}

/// POST /api/auth/forgotpassword
///
/// Store a 10-minute reset code and email it. If the email cannot be sent
/// the code is cleared again.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<&'static str>>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| CoreError::not_found("User", input.email.trim()))?;

    let grant = OtpGrant::issue(OtpPurpose::PasswordReset, Utc::now());
    UserRepo::set_reset_otp(&state.pool, user.id, &grant.code, grant.expires_at).await?;

    let body = format!(
        "Your password reset OTP is: {}\n\nIt is valid for 10 minutes.",
        grant.code
    );

    if let Err(err) = state.mailer.send(&user.email, RESET_SUBJECT, &body).await {
        tracing::warn!(user_id = user.id, error = %err, "Reset email failed, clearing code");
        UserRepo::clear_reset_otp(&state.pool, user.id).await?;
        return Err(AppError::Delivery("Email could not be sent".into()));
    }

    tracing::info!(user_id = user.id, "Password reset code sent");
    Ok(Json(ApiResponse::ok("Email sent")))
}

/// PUT /api/auth/resetpassword
///
/// Consume a valid reset or invitation code, set the new password and log
/// the user in.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || AppError::BadRequest("Invalid OTP or expired".into());

    let otp = input.otp.trim();
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !otp::verify(
        user.reset_otp.as_deref(),
        user.reset_otp_expires_at,
        otp,
        Utc::now(),
    ) {
        return Err(invalid());
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // Guarded on the verified code: a concurrent reset that got there first
    // leaves nothing to update.
    let user = UserRepo::reset_password(&state.pool, user.id, otp, &password_hash)
        .await?
        .ok_or_else(invalid)?;

    tracing::info!(user_id = user.id, "Password reset");
    Ok(Json(token_response(&state, user)?))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth.user_id))?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/auth/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::list(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// DELETE /api/auth/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if id == admin.user_id {
        return Err(AppError::BadRequest("You cannot delete yourself".into()));
    }

    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("User", id).into());
    }

    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(Json(ApiResponse::ok(serde_json::json!({}))))
}

/// PUT /api/auth/users/{id}/role
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    if id == admin.user_id && input.role != Role::Admin {
        return Err(AppError::BadRequest(
            "You cannot remove your own admin role".into(),
        ));
    }

    let user = UserRepo::update_role(&state.pool, id, input.role)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;

    tracing::info!(user_id = id, role = %input.role, admin_id = admin.user_id, "User role changed");
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/auth/invite
///
/// Create an account with a throwaway password and a 24-hour setup code,
/// then email the setup link. The account is removed again if the email
/// cannot be sent.
pub async fn invite_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<InviteRequest>,
) -> AppResult<Json<ApiResponse<&'static str>>> {
    input.validate()?;

    let password_hash = hash_password(&temporary_password())
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let grant = OtpGrant::issue(OtpPurpose::Invitation, Utc::now());
    let name = input.name.trim().to_string();

    let user = UserRepo::create_invited(
        &state.pool,
        &CreateUser {
            name: name.clone(),
            email: input.email.trim().to_string(),
            password_hash,
            role: input.role.unwrap_or(Role::Admin),
        },
        &grant.code,
        grant.expires_at,
    )
    .await?;

    let link = setup_link(&state.config.frontend_url, &user.email, &grant.code)?;
    let body = format!(
        "Hello {name},\n\n\
         You have been invited to manage the AK Design Admin Dashboard.\n\n\
         Please click the link below to set up your password and access your account:\n\n\
         {link}\n\n\
         This invitation link is valid for 24 hours."
    );

    if let Err(err) = state.mailer.send(&user.email, INVITE_SUBJECT, &body).await {
        tracing::warn!(user_id = user.id, error = %err, "Invitation email failed, removing account");
        if let Err(cleanup) = UserRepo::delete(&state.pool, user.id).await {
            tracing::error!(user_id = user.id, error = %cleanup, "Failed to remove uninvited account");
        }
        return Err(AppError::Delivery(
            "User created but email failed to send. Rolled back. Check SMTP config.".into(),
        ));
    }

    tracing::info!(user_id = user.id, admin_id = admin.user_id, "User invited");
    Ok(Json(ApiResponse::ok("User created and email sent")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let role = user.role();
    let token = generate_access_token(user.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        success: true,
        token,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
        },
    })
}

/// `{frontend}/admin/reset-password?email=..&otp=..` with encoded parameters.
pub fn setup_link(frontend_url: &str, email: &str, otp: &str) -> AppResult<String> {
    let mut url = url::Url::parse(&format!("{frontend_url}/admin/reset-password"))
        .map_err(|e| AppError::InternalError(format!("Invalid FRONTEND_URL: {e}")))?;
    url.query_pairs_mut()
        .append_pair("email", email)
        .append_pair("otp", otp);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_link_encodes_email() {
        let link = setup_link("https://akdesign.space", "a+b@example.com", "123456").unwrap();
        assert_eq!(
            link,
            "https://akdesign.space/admin/reset-password?email=a%2Bb%40example.com&otp=123456"
        );
    }

    #[test]
    fn register_role_is_optional() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "Ann",
            "email": "ann@example.com",
            "password": "secret1",
            "role": "admin"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.role.as_deref(), Some("admin"));
    }

    #[test]
    fn invite_rejects_bad_email() {
        let req: InviteRequest =
            serde_json::from_value(serde_json::json!({ "name": "Ann", "email": "nope" }))
                .unwrap();
        assert!(req.validate().is_err());
    }
}
