//! Catalog Domain
//!
//! Products and shopping carts stored in MongoDB, with a guarded product
//! delete that refuses to remove products still referenced by a cart.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Link check, error context
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Products, cart entries, identifier keys
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, mongodb::MongoCatalogRepository, service::CatalogService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("Tienda");
//!
//! let service = CatalogService::new(MongoCatalogRepository::new(&db));
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod key;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod sample_data;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use key::{ProductKey, ProductRefShape};
pub use models::{CartEntry, CatalogSnapshot, DeleteOutcome, NewProduct, Product};
pub use mongodb::MongoCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
