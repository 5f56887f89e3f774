//! Authentication extractors.
//!
//! The first request of a browser session waits for the identity provider to
//! restore the initial auth state; later requests read the identity straight
//! from the session.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use total_aereas_core::{Navigation, Page};

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::models::{CurrentUser, Flash, session_keys};
use crate::state::AppState;

/// Extractor that requires a signed-in user.
///
/// Visitors without a session are redirected to the login page with a notice.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Olá, {}!", user.greeting_name())
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts).map_err(IntoResponse::into_response)?;
        let user = load_current_user(&session, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match Page::Dashboard.resolve(user.is_some()) {
            Navigation::Render(_) => user.map(Self).ok_or_else(|| {
                AppError::Internal("dashboard resolved without a session".to_string())
                    .into_response()
            }),
            Navigation::Redirect { to, notice } => {
                tracing::debug!(path = %parts.uri.path(), "session required, redirecting");
                Flash::push(&session, notice)
                    .await
                    .map_err(|e| AppError::from(e).into_response())?;
                Err(Redirect::to(to.path()).into_response())
            }
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is signed in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        Ok(Self(load_current_user(&session, state).await?))
    }
}

fn session_from_parts(parts: &Parts) -> Result<Session, AppError> {
    // Set by SessionManagerLayer
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer missing".to_string()))
}

/// Current user, restoring the initial auth state once per session.
async fn load_current_user(
    session: &Session,
    state: &AppState,
) -> Result<Option<CurrentUser>, AppError> {
    if let Some(user) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await?
    {
        return Ok(Some(user));
    }

    if session
        .get::<bool>(session_keys::AUTH_READY)
        .await?
        .unwrap_or(false)
    {
        return Ok(None);
    }

    let restored = state.auth().restore().await?;
    session.insert(session_keys::AUTH_READY, true).await?;
    if let Some(user) = &restored {
        set_current_user(session, user).await?;
    }
    Ok(restored)
}

/// Store the signed-in user in the session.
///
/// Switching to a different uid drops the dashboard's product list so the
/// next visit reseeds it for the new user.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    let previous = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    if previous.is_some_and(|previous| previous.uid != user.uid) {
        session
            .remove::<serde_json::Value>(session_keys::DASHBOARD_PRODUCTS)
            .await?;
    }

    session.insert(session_keys::AUTH_READY, true).await?;
    session.insert(session_keys::CURRENT_USER, user).await?;
    set_sentry_user(&user.uid, user.email.as_ref().map(|e| e.as_str()));
    Ok(())
}

/// Drop all session state (logout).
///
/// Clears the identity together with the dashboard's local product list.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub async fn end_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await?;
    clear_sentry_user();
    Ok(())
}
