//! Product feed records.
//!
//! The catalog is produced by a content pipeline outside this crate and
//! consumed as a JSON array. The cart only ever needs the [`ProductRef`]
//! subset of a product; the rest is presentation data carried through for
//! the catalog browser.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::order::{ProductRef, TipoVenta};

/// One catalog product as published by the content pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub slug: String,
    pub nombre: String,
    pub descripcion_corta: String,
    pub categoria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    pub precio_publico: u64,
    pub tipo_venta: TipoVenta,
    pub codigo_producto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destacado: Option<bool>,
}

impl From<&Product> for ProductRef {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            nombre: product.nombre.clone(),
            precio_publico: product.precio_publico,
            tipo_venta: product.tipo_venta,
        }
    }
}

/// Errors loading a catalog feed file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog feed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load a product feed (JSON array of products) from `path`.
///
/// Unlike the cart, a broken feed *is* an error: the caller asked for a
/// specific file and needs to know it is unusable.
///
/// # Errors
///
/// Returns [`CatalogError`] when the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Find a product by slug in a loaded feed.
#[must_use]
pub fn find_by_slug<'a>(catalog: &'a [Product], slug: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| p.slug == slug)
}
