//! Dashboard products.
//!
//! The dashboard keeps its own ordered [`ProductList`] in the session. It is
//! seeded once from the product store and then edited locally; nothing here
//! is written back to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use total_aereas_core::{PriceLabel, ProductId, UserId};

/// Message shown when a required product field is blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Por favor, preencha todos os campos obrigatórios.";

/// A rental platform listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Image URL or site-relative path.
    pub image: String,
    pub price: PriceLabel,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
}

impl Product {
    /// Creation date as shown on the card (`dd/mm/yyyy`).
    #[must_use]
    pub fn created_on(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }

    /// Whether `user` created this product.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.created_by == user
    }
}

/// Raw add-product form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: String,
}

/// Why a product form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductFormError {
    #[error("Por favor, preencha todos os campos obrigatórios.")]
    MissingFields,
    #[error("Informe uma URL de imagem válida.")]
    InvalidImage,
}

/// A validated product, ready to be added to a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: PriceLabel,
}

impl ProductForm {
    /// Validate the submission.
    ///
    /// Name, description and image are required; price falls back to
    /// "A consultar".
    ///
    /// # Errors
    ///
    /// Returns [`ProductFormError::MissingFields`] if a required field is
    /// blank, or [`ProductFormError::InvalidImage`] if the image is neither
    /// an https URL nor a site-relative path.
    pub fn validate(&self) -> Result<NewProduct, ProductFormError> {
        let name = self.name.trim();
        let description = self.description.trim();
        let image = self.image.trim();

        if name.is_empty() || description.is_empty() || image.is_empty() {
            return Err(ProductFormError::MissingFields);
        }
        if !is_image_reference(image) {
            return Err(ProductFormError::InvalidImage);
        }

        Ok(NewProduct {
            name: name.to_owned(),
            description: description.to_owned(),
            image: image.to_owned(),
            price: PriceLabel::from_input(&self.price),
        })
    }
}

/// Accepts `/placeholder.svg?...`-style paths and absolute https URLs, the
/// two sources the content security policy lets images load from.
fn is_image_reference(image: &str) -> bool {
    if image.starts_with('/') {
        return !image.starts_with("//");
    }
    Url::parse(image).is_ok_and(|url| url.scheme() == "https")
}

/// Why a product could not be removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoveError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("product {0} belongs to another user")]
    NotOwner(ProductId),
}

/// The dashboard's ordered, session-local list of products.
///
/// Ids in the list are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductList {
    items: Vec<Product>,
}

impl ProductList {
    /// Build a list from a store snapshot, dropping repeated ids.
    #[must_use]
    pub fn from_snapshot(snapshot: Vec<Product>) -> Self {
        let mut list = Self::default();
        for product in snapshot {
            if list.get(&product.id).is_none() {
                list.items.push(product);
            }
        }
        list
    }

    /// Append a product created by `creator` at `now`.
    ///
    /// The id is the creation time in milliseconds, bumped past any id
    /// already in the list.
    #[allow(clippy::indexing_slicing)] // index of the element just pushed
    pub fn add(&mut self, draft: NewProduct, creator: &UserId, now: DateTime<Utc>) -> &Product {
        let id = self.next_id(now.timestamp_millis());
        let index = self.items.len();
        self.items.push(Product {
            id,
            name: draft.name,
            description: draft.description,
            image: draft.image,
            price: draft.price,
            created_at: now,
            created_by: creator.clone(),
        });
        &self.items[index]
    }

    /// Remove the product with `id`, provided `requester` created it.
    ///
    /// # Errors
    ///
    /// Returns [`RemoveError::NotFound`] for an unknown id and
    /// [`RemoveError::NotOwner`] when someone else created the product.
    #[allow(clippy::indexing_slicing)] // index comes from `position`
    pub fn remove(&mut self, id: &ProductId, requester: &UserId) -> Result<Product, RemoveError> {
        let index = self
            .items
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| RemoveError::NotFound(id.clone()))?;

        if !self.items[index].is_owned_by(requester) {
            return Err(RemoveError::NotOwner(id.clone()));
        }

        Ok(self.items.remove(index))
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|p| &p.id == id)
    }

    /// Products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn next_id(&self, mut millis: i64) -> ProductId {
        loop {
            let candidate = ProductId::from_millis(millis);
            if self.get(&candidate).is_none() {
                return candidate;
            }
            millis += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn form(name: &str, description: &str, image: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            price: price.to_string(),
        }
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn draft(name: &str) -> NewProduct {
        form(name, "Para obras", "/placeholder.svg?height=256&width=400", "")
            .validate()
            .unwrap()
    }

    #[test]
    fn test_validate_requires_each_field() {
        let image = "/placeholder.svg";
        assert_eq!(
            form("", "desc", image, "").validate(),
            Err(ProductFormError::MissingFields)
        );
        assert_eq!(
            form("Tesoura", "  ", image, "").validate(),
            Err(ProductFormError::MissingFields)
        );
        assert_eq!(
            form("Tesoura", "desc", "", "").validate(),
            Err(ProductFormError::MissingFields)
        );
    }

    #[test]
    fn test_validate_defaults_price() {
        let product = form("Tesoura", "desc", "/placeholder.svg", " ").validate().unwrap();
        assert_eq!(product.price.as_str(), "A consultar");
    }

    #[test]
    fn test_validate_image_reference() {
        assert!(form("a", "b", "https://cdn.example.com/x.png", "").validate().is_ok());
        assert!(form("a", "b", "/placeholder.svg?height=1", "").validate().is_ok());
        assert_eq!(
            form("a", "b", "http://cdn.example.com/x.png", "").validate(),
            Err(ProductFormError::InvalidImage)
        );
        assert_eq!(
            form("a", "b", "ftp://example.com/x.png", "").validate(),
            Err(ProductFormError::InvalidImage)
        );
        assert_eq!(
            form("a", "b", "//evil.example/x.png", "").validate(),
            Err(ProductFormError::InvalidImage)
        );
        assert_eq!(
            form("a", "b", "imagem.png", "").validate(),
            Err(ProductFormError::InvalidImage)
        );
    }

    #[test]
    fn test_add_appends_exactly_one() {
        let owner = UserId::new("mock-user-9");
        let mut list = ProductList::default();
        list.add(draft("Tesoura 8m"), &owner, at(1_000));
        let added = list.add(draft("Articulada 16m"), &owner, at(2_000)).clone();

        assert_eq!(list.len(), 2);
        assert_eq!(added.name, "Articulada 16m");
        assert_eq!(added.id.as_str(), "2000");
        assert_eq!(added.created_by, owner);
        assert_eq!(list.iter().last(), Some(&added));
    }

    #[test]
    fn test_add_keeps_ids_unique_within_same_millisecond() {
        let owner = UserId::new("mock-user-9");
        let mut list = ProductList::default();
        for name in ["a", "b", "c"] {
            list.add(draft(name), &owner, at(5_000));
        }
        let ids: Vec<_> = list.iter().map(|p| p.id.as_str().to_owned()).collect();
        assert_eq!(ids, ["5000", "5001", "5002"]);
    }

    #[test]
    fn test_remove_only_targets_one_entry() {
        let owner = UserId::new("mock-user-9");
        let mut list = ProductList::default();
        for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
            list.add(draft(name), &owner, at(1_000 * (i64::try_from(i).unwrap() + 1)));
        }

        let removed = list.remove(&ProductId::new("2000"), &owner).unwrap();
        assert_eq!(removed.name, "b");
        let names: Vec<_> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_remove_checks_owner_and_existence() {
        let owner = UserId::new("mock-user-9");
        let other = UserId::new("mock-user-10");
        let mut list = ProductList::default();
        list.add(draft("a"), &owner, at(1_000));

        assert_eq!(
            list.remove(&ProductId::new("1000"), &other),
            Err(RemoveError::NotOwner(ProductId::new("1000")))
        );
        assert_eq!(
            list.remove(&ProductId::new("404"), &owner),
            Err(RemoveError::NotFound(ProductId::new("404")))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_from_snapshot_drops_repeated_ids() {
        let owner = UserId::new("mock-user-9");
        let mut seed = ProductList::default();
        let product = seed.add(draft("a"), &owner, at(1_000)).clone();

        let list = ProductList::from_snapshot(vec![product.clone(), product]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_created_on_format() {
        let owner = UserId::new("mock-user-9");
        let mut list = ProductList::default();
        let product = list.add(draft("a"), &owner, Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap());
        assert_eq!(product.created_on(), "07/03/2025");
    }
}
