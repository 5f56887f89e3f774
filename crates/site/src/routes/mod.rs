//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Home page (hero, about, services, fleet, contact)
//! POST /contact                           - Contact form
//! GET  /placeholder.svg                   - Generated placeholder image
//! GET  /health                            - Health check (see `app`)
//!
//! # Auth
//! GET  /login                             - Login page
//! POST /login                             - Email/password sign-in
//! POST /login/demo                        - Demo sign-in
//! POST /login/social/{provider}           - Social sign-in
//! GET  /register                          - Register page
//! POST /register                          - Create account
//! POST /register/social/{provider}        - Social sign-up
//! POST /logout                            - Sign out
//!
//! # Dashboard (requires auth)
//! GET  /dashboard                         - Product dashboard
//! POST /dashboard/products                - Add product
//! POST /dashboard/products/{id}/delete    - Delete product
//! POST /dashboard/products/{id}/quote     - Request a quote
//! ```
//!
//! Anything else renders the not-found view with status 404.

pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod placeholder;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
};
use tower_sessions::Session;

use total_aereas_core::{Page, Section};

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Flash};
use crate::state::AppState;

// =============================================================================
// Shared Page Layout
// =============================================================================

/// Data every page passes to `base.html`: navigation state and the pending
/// notice.
pub struct Layout {
    /// Signed-in user, if any.
    pub user: Option<CurrentUser>,
    /// Message for the "Aviso!" modal.
    pub notice: Option<String>,
    /// Name of the page being rendered (`home`, `login`, ...), empty for the
    /// not-found view.
    pub current: &'static str,
    /// Home page anchors linked from the header.
    pub sections: [Section; 4],
}

impl Layout {
    /// Build the layout, taking the pending notice out of the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn load(
        session: &Session,
        user: Option<CurrentUser>,
        page: Option<Page>,
    ) -> Result<Self> {
        Ok(Self {
            user,
            notice: Flash::take(session).await?,
            current: page.map_or("", Page::as_str),
            sections: Section::ALL,
        })
    }

    /// Replace the notice with `message`.
    #[must_use]
    pub fn with_notice(mut self, message: impl Into<String>) -> Self {
        self.notice = Some(message.into());
        self
    }
}

// =============================================================================
// Not Found
// =============================================================================

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

/// Fallback for unknown paths.
pub async fn not_found(
    OptionalAuth(user): OptionalAuth,
    session: Session,
    uri: Uri,
) -> Result<impl IntoResponse> {
    tracing::debug!(path = %uri.path(), "page not found");
    let layout = Layout::load(&session, user, None).await?;
    Ok((StatusCode::NOT_FOUND, NotFoundTemplate { layout }))
}

// =============================================================================
// Routers
// =============================================================================

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/login/demo", post(auth::demo_login))
        .route("/login/social/{provider}", post(auth::social_login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/register/social/{provider}", post(auth::social_register))
        .route("/logout", post(auth::logout))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::show))
        .route("/products", post(dashboard::add))
        .route("/products/{id}/delete", post(dashboard::delete))
        .route("/products/{id}/quote", post(dashboard::quote))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/contact", post(contact::submit))
        .route("/placeholder.svg", get(placeholder::placeholder))
        .merge(auth_routes())
        .nest("/dashboard", dashboard_routes())
        .fallback(not_found)
}
