//! Domain models for the site.
//!
//! - [`session`] - Signed-in identity and session keys
//! - [`product`] - Dashboard products and the session-local product list
//! - [`flash`] - One-shot modal notices

pub mod flash;
pub mod product;
pub mod session;

pub use flash::Flash;
pub use product::{NewProduct, Product, ProductForm, ProductList};
pub use session::{CurrentUser, keys as session_keys};
