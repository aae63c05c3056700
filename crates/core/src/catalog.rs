//! Immutable product catalog and the filter semantics evaluated against it.
//!
//! The catalog is constructed once at startup from a seed fixture, validated
//! against the collection invariants, and then only ever read. Query state is
//! per-request and owned by the caller, so lookups and scans need no
//! synchronization.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::product::{Product, ProductId};
use crate::errors::CatalogError;

/// How malformed numeric filter text is treated.
///
/// `Permissive` reproduces the documented wire behavior: text that fails to
/// parse as a decimal imposes no constraint. `Strict` rejects it with a
/// validation error instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    Permissive,
    Strict,
}

/// Filter parameters as they arrive from the transport layer, still
/// text-encoded. Blank and whitespace-only values count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawProductFilter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl RawProductFilter {
    /// Resolve the text parameters into typed predicates under `mode`.
    pub fn resolve(self, mode: FilterMode) -> Result<ProductFilter, CatalogError> {
        Ok(ProductFilter {
            title: normalize(self.title),
            slug: normalize(self.slug),
            min_price: parse_price_bound("minPrice", self.min_price, mode)?,
            max_price: parse_price_bound("maxPrice", self.max_price, mode)?,
        })
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_price_bound(
    field: &'static str,
    raw: Option<String>,
    mode: FilterMode,
) -> Result<Option<Decimal>, CatalogError> {
    let Some(raw) = normalize(raw) else {
        return Ok(None);
    };
    match raw.parse::<Decimal>() {
        Ok(bound) => Ok(Some(bound)),
        Err(_) if mode == FilterMode::Permissive => Ok(None),
        Err(_) => Err(CatalogError::InvalidPriceBound { field, value: raw }),
    }
}

/// Typed filter predicates. An absent field imposes no constraint; supplied
/// fields combine with logical AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring match against the title.
    pub title: Option<String>,
    /// Case-sensitive exact match against the slug.
    pub slug: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(title) = &self.title {
            if !product.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if let Some(slug) = &self.slug {
            if product.slug != *slug {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}

/// Problems constructing a catalog from seed data. All of these abort
/// bootstrap; none can occur once the catalog exists.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("could not read seed file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse product seed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("product id {0} is not positive")]
    NonPositiveId(i64),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has an empty title")]
    EmptyTitle(ProductId),
    #[error("product {0} has an empty slug")]
    EmptySlug(ProductId),
    #[error("duplicate product slug `{0}`")]
    DuplicateSlug(String),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// The static product collection. Built once at process start, shared
/// read-only with the query surface, never mutated.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Seed dataset shipped with the service, used when no seed file is
    /// configured.
    pub const EMBEDDED_SEED: &'static str = include_str!("../../../config/seed/products.json");

    /// Validate the collection invariants and take ownership. Seed order is
    /// preserved; it is the order queries return.
    pub fn new(products: Vec<Product>) -> Result<Self, SeedError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();

        for product in &products {
            if product.id.value() <= 0 {
                return Err(SeedError::NonPositiveId(product.id.value()));
            }
            if !ids.insert(product.id) {
                return Err(SeedError::DuplicateId(product.id));
            }
            if product.title.trim().is_empty() {
                return Err(SeedError::EmptyTitle(product.id));
            }
            if product.slug.trim().is_empty() {
                return Err(SeedError::EmptySlug(product.id));
            }
            if !slugs.insert(product.slug.clone()) {
                return Err(SeedError::DuplicateSlug(product.slug.clone()));
            }
            if product.price < Decimal::ZERO {
                return Err(SeedError::NegativePrice(product.id));
            }
        }

        Ok(Self { products })
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Self::new(serde_json::from_str(raw)?)
    }

    pub fn from_embedded_seed() -> Result<Self, SeedError> {
        Self::from_json(Self::EMBEDDED_SEED)
    }

    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| SeedError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_json(&raw)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Parse a text identifier and look the product up.
    ///
    /// Non-numeric text fails with `InvalidId`; a well-formed id with no
    /// record fails with `NotFound`.
    pub fn get(&self, raw_id: &str) -> Result<&Product, CatalogError> {
        let id: ProductId = raw_id.parse()?;
        self.find(id).ok_or(CatalogError::NotFound(id))
    }

    /// Single linear scan evaluating the active predicates per element.
    /// No index, no sort: results keep collection order.
    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|product| filter.matches(product)).collect()
    }
}
