//! Product store.
//!
//! [`MockProductStore`] stands in for a hosted document store. Listing waits a
//! fixed delay and then yields three seeded platforms; creating echoes back a
//! synthetic document id. The dashboard reads the list once per session and
//! edits its own copy afterwards.

mod error;

pub use error::CatalogError;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use total_aereas_core::{PriceLabel, ProductId, UserId};

use crate::models::{NewProduct, Product};
use crate::services::auth::DEMO_USER_ID;

/// Image used by the seeded products.
const SEED_IMAGE: &str = "/placeholder.svg?height=256&width=400";

/// Capacity of the catalog event channel.
const EVENT_CAPACITY: usize = 64;

/// Change notification published by a product store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// The initial product list was delivered.
    Listed { count: usize },
    /// A product document was created.
    Created { id: ProductId, name: String },
}

/// A product store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Current product list.
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;

    /// Store a new product, returning its document id.
    async fn create(
        &self,
        product: &NewProduct,
        created_by: &UserId,
    ) -> Result<ProductId, CatalogError>;

    /// Subscribe to store change notifications.
    fn subscribe(&self) -> broadcast::Receiver<CatalogEvent>;
}

/// Product store returning canned data after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockProductStore {
    delay: Duration,
    events: broadcast::Sender<CatalogEvent>,
}

impl MockProductStore {
    /// Create a store that waits `delay` before yielding its list.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { delay, events }
    }
}

#[async_trait]
impl ProductStore for MockProductStore {
    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        tokio::time::sleep(self.delay).await;
        let products = seed_products(Utc::now());
        let _ = self.events.send(CatalogEvent::Listed {
            count: products.len(),
        });
        Ok(products)
    }

    async fn create(
        &self,
        product: &NewProduct,
        _created_by: &UserId,
    ) -> Result<ProductId, CatalogError> {
        let id = ProductId::new(format!("new-doc-{}", Utc::now().timestamp_millis()));
        let _ = self.events.send(CatalogEvent::Created {
            id: id.clone(),
            name: product.name.clone(),
        });
        Ok(id)
    }

    fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }
}

/// The three platforms every dashboard starts with.
#[must_use]
pub fn seed_products(created_at: DateTime<Utc>) -> Vec<Product> {
    [
        (
            "1",
            "Plataforma Tesoura Elétrica Compacta",
            "Ideal para ambientes internos e acesso em espaços limitados. Operação silenciosa e sem emissões.",
            "R$ 250/dia",
        ),
        (
            "2",
            "Plataforma Articulada 16m Diesel",
            "Excelente alcance vertical e horizontal para terrenos irregulares. Robusta e versátil.",
            "R$ 400/dia",
        ),
        (
            "3",
            "Plataforma Telescópica 28m",
            "Máximo alcance para grandes obras e manutenção de fachadas. Alta capacidade de carga.",
            "R$ 600/dia",
        ),
    ]
    .into_iter()
    .map(|(id, name, description, price)| Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        image: SEED_IMAGE.to_owned(),
        price: PriceLabel::from_input(price),
        created_at,
        created_by: UserId::new(DEMO_USER_ID),
    })
    .collect()
}
