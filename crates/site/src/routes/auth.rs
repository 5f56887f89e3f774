//! Authentication route handlers.
//!
//! Handles login, registration, social and demo sign-in, and logout through
//! the configured identity provider. Successful sign-ins flash a notice and
//! redirect to the dashboard; invalid input re-renders the form with the
//! notice and the submitted email.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use total_aereas_core::Page;

use super::Layout;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{OptionalAuth, end_session, set_current_user};
use crate::models::{CurrentUser, Flash};
use crate::services::auth::{self, SocialProvider};
use crate::state::AppState;

// =============================================================================
// Notices
// =============================================================================

const LOGIN_SUCCESS: &str = "Login realizado com sucesso!";
const LOGIN_FAILED: &str = "Erro ao fazer login. Verifique suas credenciais.";
const REGISTER_SUCCESS: &str = "Conta criada com sucesso! Você já está logado.";
const REGISTER_FAILED: &str = "Erro ao criar conta. Tente novamente.";
const LOGOUT_SUCCESS: &str = "Você foi desconectado com sucesso.";

fn social_login_success(provider: SocialProvider) -> String {
    format!("Login com {} realizado com sucesso!", provider.label())
}

fn social_login_failed(provider: SocialProvider) -> String {
    format!("Erro ao fazer login com {}.", provider.label())
}

fn social_register_success(provider: SocialProvider) -> String {
    format!("Conta criada com {} com sucesso!", provider.label())
}

fn social_register_failed(provider: SocialProvider) -> String {
    format!("Erro ao criar conta com {}.", provider.label())
}

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    /// Email to pre-fill after a rejected submission.
    pub email: String,
    pub providers: [SocialProvider; 2],
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    /// Email to pre-fill after a rejected submission.
    pub email: String,
    pub providers: [SocialProvider; 2],
    pub min_password_length: usize,
}

const PROVIDERS: [SocialProvider; 2] = [SocialProvider::Google, SocialProvider::Facebook];

fn login_template(layout: Layout, email: String) -> LoginTemplate {
    LoginTemplate {
        layout,
        email,
        providers: PROVIDERS,
    }
}

fn register_template(layout: Layout, email: String) -> RegisterTemplate {
    RegisterTemplate {
        layout,
        email,
        providers: PROVIDERS,
        min_password_length: auth::MIN_PASSWORD_LENGTH,
    }
}

/// Record the new identity and send the visitor to the dashboard.
async fn signed_in(session: &Session, user: &CurrentUser, notice: &str) -> Result<Response> {
    set_current_user(session, user).await?;
    Flash::push(session, notice).await?;
    add_breadcrumb("auth", "Signed in", Some(&[("uid", user.uid.as_str())]));
    tracing::info!(uid = %user.uid, "User signed in");
    Ok(Redirect::to(Page::Dashboard.path()).into_response())
}

/// Flash `notice` and go back to `page`.
async fn back_to(session: &Session, page: Page, notice: impl Into<String>) -> Result<Response> {
    Flash::push(session, notice).await?;
    Ok(Redirect::to(page.path()).into_response())
}

fn parse_provider(raw: &str) -> Result<SocialProvider> {
    raw.parse().map_err(AppError::from)
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let layout = Layout::load(&session, user, Some(Page::Login)).await?;
    Ok(login_template(layout, String::new()))
}

/// Handle login form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let credentials = match auth::validate_login(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::debug!(error = %e, "Login rejected");
            let layout = Layout::load(&session, user, Some(Page::Login))
                .await?
                .with_notice(e.to_string());
            return Ok(login_template(layout, form.email).into_response());
        }
    };

    match state.auth().sign_in_with_password(&credentials).await {
        Ok(user) => signed_in(&session, &user, LOGIN_SUCCESS).await,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            back_to(&session, Page::Login, LOGIN_FAILED).await
        }
    }
}

/// Sign in as the demo identity.
#[instrument(skip_all)]
pub async fn demo_login(State(state): State<AppState>, session: Session) -> Result<Response> {
    match state.auth().sign_in_anonymously().await {
        Ok(user) => signed_in(&session, &user, LOGIN_SUCCESS).await,
        Err(e) => {
            tracing::warn!(error = %e, "Demo login failed");
            back_to(&session, Page::Login, LOGIN_FAILED).await
        }
    }
}

/// Sign in through a social provider.
#[instrument(skip_all, fields(provider = %provider))]
pub async fn social_login(
    State(state): State<AppState>,
    session: Session,
    Path(provider): Path<String>,
) -> Result<Response> {
    let provider = parse_provider(&provider)?;
    match state.auth().sign_in_with_provider(provider).await {
        Ok(user) => signed_in(&session, &user, &social_login_success(provider)).await,
        Err(e) => {
            tracing::warn!(error = %e, "Social login failed");
            back_to(&session, Page::Login, social_login_failed(provider)).await
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
#[instrument(skip_all)]
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let layout = Layout::load(&session, user, Some(Page::Register)).await?;
    Ok(register_template(layout, String::new()))
}

/// Handle registration form submission.
///
/// The provider is only called once every check in
/// [`auth::validate_registration`] passes.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let credentials =
        match auth::validate_registration(&form.email, &form.password, &form.password_confirm) {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::debug!(error = %e, "Registration rejected");
                let layout = Layout::load(&session, user, Some(Page::Register))
                    .await?
                    .with_notice(e.to_string());
                return Ok(register_template(layout, form.email).into_response());
            }
        };

    match state.auth().sign_up(&credentials).await {
        Ok(user) => signed_in(&session, &user, REGISTER_SUCCESS).await,
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            back_to(&session, Page::Register, REGISTER_FAILED).await
        }
    }
}

/// Create an account through a social provider.
#[instrument(skip_all, fields(provider = %provider))]
pub async fn social_register(
    State(state): State<AppState>,
    session: Session,
    Path(provider): Path<String>,
) -> Result<Response> {
    let provider = parse_provider(&provider)?;
    match state.auth().sign_in_with_provider(provider).await {
        Ok(user) => signed_in(&session, &user, &social_register_success(provider)).await,
        Err(e) => {
            tracing::warn!(error = %e, "Social registration failed");
            back_to(&session, Page::Register, social_register_failed(provider)).await
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Drops the whole session, including the dashboard's product list.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<Response> {
    if let Some(user) = &user {
        if let Err(e) = state.auth().sign_out(user).await {
            tracing::warn!(error = %e, "Logout failed");
            return back_to(&session, Page::Home, format!("Erro ao fazer logout: {e}")).await;
        }
        tracing::info!(uid = %user.uid, "User signed out");
    }

    end_session(&session).await?;
    back_to(&session, Page::Home, LOGOUT_SUCCESS).await
}
