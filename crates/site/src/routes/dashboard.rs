//! Product dashboard route handlers.
//!
//! The dashboard works on a session-local [`ProductList`]. The first visit in a
//! session copies the product store's list into the session; adding and
//! deleting only touch that copy.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use total_aereas_core::{Page, ProductId, UserId};

use super::Layout;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::product::RemoveError;
use crate::models::{CurrentUser, Flash, Product, ProductForm, ProductList, session_keys};
use crate::state::AppState;

const PRODUCT_ADDED: &str = "Produto adicionado com sucesso!";
const PRODUCT_DELETED: &str = "Produto excluído com sucesso!";

/// Notice shown after a quote request for `name`.
#[must_use]
pub fn quote_requested(name: &str) -> String {
    format!("Orçamento solicitado para \"{name}\". Nossa equipe entrará em contato em breve!")
}

// =============================================================================
// Templates
// =============================================================================

/// A product as shown on the dashboard grid.
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub created_on: String,
    /// Whether the viewer created the product and may delete it.
    pub can_delete: bool,
}

impl ProductCard {
    fn new(product: &Product, viewer: &UserId) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
            created_on: product.created_on(),
            can_delete: product.is_owned_by(viewer),
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub greeting: String,
    pub uid: String,
    pub products: Vec<ProductCard>,
    /// Values shown in the add-product form.
    pub form: ProductForm,
}

async fn render(
    session: &Session,
    user: CurrentUser,
    products: &ProductList,
    form: ProductForm,
    notice: Option<String>,
) -> Result<DashboardTemplate> {
    let cards = products
        .iter()
        .map(|product| ProductCard::new(product, &user.uid))
        .collect();
    let greeting = user.greeting_name().to_owned();
    let uid = user.uid.to_string();

    let mut layout = Layout::load(session, Some(user), Some(Page::Dashboard)).await?;
    if let Some(notice) = notice {
        layout = layout.with_notice(notice);
    }

    Ok(DashboardTemplate {
        layout,
        greeting,
        uid,
        products: cards,
        form,
    })
}

// =============================================================================
// Session-Local Product List
// =============================================================================

/// The session's product list, seeding it from the store on first use.
async fn load_products(session: &Session, state: &AppState) -> Result<ProductList> {
    if let Some(products) = session
        .get::<ProductList>(session_keys::DASHBOARD_PRODUCTS)
        .await?
    {
        return Ok(products);
    }

    let products = ProductList::from_snapshot(state.catalog().list().await?);
    tracing::debug!(count = products.len(), "Dashboard list seeded from store");
    save_products(session, &products).await?;
    Ok(products)
}

async fn save_products(session: &Session, products: &ProductList) -> Result<()> {
    session
        .insert(session_keys::DASHBOARD_PRODUCTS, products)
        .await?;
    Ok(())
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the dashboard.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let products = load_products(&session, &state).await?;
    render(&session, user, &products, ProductForm::default(), None).await
}

/// Handle the add-product form.
///
/// A rejected form re-renders the dashboard with the submitted values; an
/// accepted one appends exactly one product and redirects to an empty form.
#[instrument(skip_all, fields(name = %form.name))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let mut products = load_products(&session, &state).await?;

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "Product rejected");
            let page = render(&session, user, &products, form, Some(e.to_string())).await?;
            return Ok(page.into_response());
        }
    };

    let product = products.add(draft, &user.uid, Utc::now());
    let id = product.id.to_string();
    tracing::info!(product_id = %id, uid = %user.uid, "Product added");
    add_breadcrumb("dashboard", "Product added", Some(&[("product_id", &id)]));

    save_products(&session, &products).await?;
    Flash::push(&session, PRODUCT_ADDED).await?;
    Ok(Redirect::to(Page::Dashboard.path()).into_response())
}

/// Delete a product the signed-in user created.
#[instrument(skip_all, fields(product_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response> {
    let mut products = load_products(&session, &state).await?;
    let id = ProductId::new(id);

    match products.remove(&id, &user.uid) {
        Ok(_) => {}
        Err(RemoveError::NotFound(id)) => return Err(AppError::NotFound(id.to_string())),
        Err(RemoveError::NotOwner(id)) => {
            tracing::warn!(product_id = %id, uid = %user.uid, "Delete refused: not the creator");
            return Err(AppError::Forbidden(id.to_string()));
        }
    }

    tracing::info!(product_id = %id, uid = %user.uid, "Product deleted");
    add_breadcrumb("dashboard", "Product deleted", Some(&[("product_id", id.as_str())]));

    save_products(&session, &products).await?;
    Flash::push(&session, PRODUCT_DELETED).await?;
    Ok(Redirect::to(Page::Dashboard.path()).into_response())
}

/// Request a quote for a product.
#[instrument(skip_all, fields(product_id = %id))]
pub async fn quote(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response> {
    let products = load_products(&session, &state).await?;
    let id = ProductId::new(id);
    let product = products
        .get(&id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    tracing::info!(product_id = %id, uid = %user.uid, "Quote requested");
    Flash::push(&session, quote_requested(&product.name)).await?;
    Ok(Redirect::to(Page::Dashboard.path()).into_response())
}
