pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;

pub use catalog::{Catalog, FilterMode, ProductFilter, RawProductFilter, SeedError};
pub use domain::product::{Category, Product, ProductId};
pub use errors::CatalogError;
