//! Cart state and mutation semantics.
//!
//! [`OrderState`] is the single authority on cart shape: items stay unique by
//! slug, quantities stay positive integers, and every mutation goes through
//! the methods here. Persistence lives in [`crate::store`]; this module is
//! pure data.
//!
//! Serialized field names match the storefront's historical JSON shape
//! (`precioPublico`, `tipoVenta`, `cityId`, ...), including the empty string
//! standing in for "not selected yet" on `cityId` and `payment`.

use serde::{Deserialize, Serialize};

use crate::shipping::CityId;

/// How a product is sold. Display discriminator only; quantities are integer
/// counts either way (cable is sold in whole metres).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoVenta {
    Unidad,
    Metro,
}

impl TipoVenta {
    /// Suffix appended to quantities in order messages (`3u`, `12m`).
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::Unidad => 'u',
            Self::Metro => 'm',
        }
    }
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payment {
    /// Bank transfer.
    Transferencia,
    /// Giro Tigo mobile money.
    Tigo,
    /// Cash on delivery.
    Puerta,
}

impl Payment {
    /// Label used in order messages and the checkout UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transferencia => "Transferencia",
            Self::Tigo => "Giro Tigo",
            Self::Puerta => "En puerta (sujeto a confirmación)",
        }
    }

    /// Stable identifier, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transferencia => "transferencia",
            Self::Tigo => "tigo",
            Self::Puerta => "puerta",
        }
    }
}

/// Error returned when parsing an unknown payment method.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown payment method: {0} (expected transferencia, tigo or puerta)")]
pub struct ParsePaymentError(String);

impl std::str::FromStr for Payment {
    type Err = ParsePaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transferencia" => Ok(Self::Transferencia),
            "tigo" => Ok(Self::Tigo),
            "puerta" => Ok(Self::Puerta),
            other => Err(ParsePaymentError(other.to_owned())),
        }
    }
}

/// The catalog fields the cart needs when a product is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub slug: String,
    pub nombre: String,
    pub precio_publico: u64,
    pub tipo_venta: TipoVenta,
}

/// One catalog product currently in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub slug: String,
    pub nombre: String,
    pub precio_publico: u64,
    pub tipo_venta: TipoVenta,
    /// Always in `1..=MAX_CANTIDAD`; enforced by every mutation.
    pub cantidad: u64,
}

impl OrderItem {
    /// `precio_publico * cantidad`, saturating at `u64::MAX`.
    ///
    /// Quantities are capped at [`MAX_CANTIDAD`], but the price comes from an
    /// external feed, so the multiplication still saturates instead of
    /// trusting both factors.
    #[must_use]
    pub const fn line_total(&self) -> u64 {
        self.precio_publico.saturating_mul(self.cantidad)
    }
}

/// The entire cart: items plus delivery and payment choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderState {
    pub items: Vec<OrderItem>,
    /// Selected delivery zone; `None` until the customer picks one.
    #[serde(with = "empty_as_none")]
    pub city_id: Option<CityId>,
    /// Selected payment method; `None` until the customer picks one.
    #[serde(with = "empty_as_none")]
    pub payment: Option<Payment>,
}

impl OrderState {
    /// Add one unit of `product` to the cart.
    ///
    /// If an item with the same slug already exists its quantity is bumped by
    /// one and its display fields are left untouched (first write wins);
    /// otherwise a new item is appended with `cantidad = 1`.
    pub fn add_item(&mut self, product: &ProductRef) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.slug == product.slug) {
            existing.cantidad += 1;
        } else {
            self.items.push(OrderItem {
                slug: product.slug.clone(),
                nombre: product.nombre.clone(),
                precio_publico: product.precio_publico,
                tipo_venta: product.tipo_venta,
                cantidad: 1,
            });
        }
    }

    /// Set the quantity of the item with `slug` to `normalize_quantity(qty)`.
    ///
    /// No-op when no such item exists. Fractional and non-positive inputs are
    /// clamped, never rejected.
    pub fn update_qty(&mut self, slug: &str, qty: f64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.slug == slug) {
            item.cantidad = normalize_quantity(qty);
        }
    }

    /// Drop the item with `slug`; no-op when absent.
    pub fn remove_item(&mut self, slug: &str) {
        self.items.retain(|i| i.slug != slug);
    }

    /// Sum of line totals, saturating; 0 for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |acc, i| acc.saturating_add(i.line_total()))
    }

    /// Total unit count across all items (the header badge number).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |acc, i| acc.saturating_add(i.cantidad))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Upper bound on any single item quantity.
///
/// Nothing in the catalog is ordered by the million; the cap exists so a
/// stored quantity can never push line totals anywhere near `u64` overflow.
pub const MAX_CANTIDAD: u64 = 1_000_000;

/// Clamp a requested quantity to a valid one:
/// `max(1, min(floor(qty), MAX_CANTIDAD))`.
///
/// Quantity edits come from free-form inputs, so anything non-numeric ends up
/// here as NaN, zero or a fraction; policy is to clamp rather than reject.
#[must_use]
// Clamped to MAX_CANTIDAD in f64 first, so the cast is exact.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn normalize_quantity(qty: f64) -> u64 {
    if qty.is_finite() && qty >= 1.0 {
        qty.floor().min(MAX_CANTIDAD as f64) as u64
    } else {
        1
    }
}

/// Serde adapter mapping the persisted empty string to `None`.
///
/// Unknown identifiers (a removed city, a typo from a hand-edited payload)
/// also map to `None`: the selection silently resets instead of taking the
/// whole cart down.
mod empty_as_none {
    use serde::de::IntoDeserializer;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        let parsed: Result<T, serde::de::value::Error> = T::deserialize(raw.into_deserializer());
        Ok(parsed.ok())
    }
}
