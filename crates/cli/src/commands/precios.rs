//! Supplier price-list conversion.
//!
//! One-shot batch step with no bearing on runtime cart logic: reads a
//! two-column CSV (`codigoProducto,precioPublico`) and emits a code→price
//! JSON object the content pipeline merges into the catalog. This is the one
//! place in the workspace that hard-fails: a missing file or missing required
//! columns is a fatal error, while individual bad rows are skipped.
//!
//! # Usage
//!
//! ```bash
//! mbarete precios convertir -e src/data/precios.csv -s src/data/precios.json
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during price-list conversion.
#[derive(Debug, Error)]
pub enum PreciosError {
    /// Input CSV does not exist.
    #[error("No existe {0}")]
    EntradaFaltante(String),

    /// Required header columns are missing.
    #[error("El CSV debe tener columnas: codigoProducto,precioPublico")]
    ColumnasFaltantes,

    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization failed.
    #[error("Failed to serialize price map: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convert `entrada` (CSV) into `salida` (pretty-printed JSON map).
///
/// Returns the number of prices written.
///
/// # Errors
///
/// Returns [`PreciosError`] when the input is missing, the required columns
/// are absent, or the output cannot be written.
pub fn convertir(entrada: &Path, salida: &Path) -> Result<usize, PreciosError> {
    if !entrada.exists() {
        return Err(PreciosError::EntradaFaltante(
            entrada.display().to_string(),
        ));
    }
    let csv = fs::read_to_string(entrada)?;
    let map = parse_precios(&csv)?;
    fs::write(salida, serde_json::to_string_pretty(&map)?)?;
    println!("OK → {} ({} precios)", salida.display(), map.len());
    Ok(map.len())
}

/// Parse the CSV body into a code→price map.
///
/// Rows with an empty code or a non-numeric price are skipped, not errors;
/// the price lists are hand-maintained spreadsheet exports and always contain
/// a few stragglers. Fractional prices are kept and rounded to whole
/// guaraníes (the price map is integer-only). Later rows win on duplicate
/// codes.
fn parse_precios(csv: &str) -> Result<BTreeMap<String, u64>, PreciosError> {
    let mut lines = csv.trim().lines();
    let headers: Vec<&str> = lines
        .next()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .collect();

    let idx_codigo = headers.iter().position(|h| *h == "codigoProducto");
    let idx_precio = headers.iter().position(|h| *h == "precioPublico");
    let (Some(idx_codigo), Some(idx_precio)) = (idx_codigo, idx_precio) else {
        return Err(PreciosError::ColumnasFaltantes);
    };

    let mut map = BTreeMap::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split(',').map(str::trim).collect();
        let Some(codigo) = cols.get(idx_codigo).filter(|c| !c.is_empty()) else {
            continue;
        };
        let Some(precio) = cols.get(idx_precio).and_then(|p| parse_precio(p)) else {
            continue;
        };
        map.insert((*codigo).to_owned(), precio);
    }
    Ok(map)
}

/// Parse one price cell; fractional values round to the nearest guaraní.
// Negative and non-finite values are rejected first, so the cast is safe.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_precio(raw: &str) -> Option<u64> {
    if let Ok(entero) = raw.parse::<u64>() {
        return Some(entero);
    }
    let decimal: f64 = raw.parse().ok()?;
    (decimal.is_finite() && decimal >= 0.0).then(|| decimal.round() as u64)
}
