//! Mbarete Eléctrico core - order, shipping and messaging logic.
//!
//! This crate is the whole "backend" of the storefront: a locally persisted
//! cart, derived pricing, and deterministic WhatsApp message rendering. There
//! is no server, no payments integration and no inventory; orders leave the
//! system as a pre-filled `wa.me` deep link.
//!
//! # Architecture
//!
//! The crate contains no I/O beyond the injected [`store::Storage`]
//! abstraction. Presentation (catalog browser, cart UI, checkout form) is an
//! external collaborator that calls mutations and renders whatever the core
//! computes.
//!
//! # Modules
//!
//! - [`order`] - Cart state shape and mutation semantics
//! - [`store`] - Persistence, storage abstraction, change notifications
//! - [`shipping`] - Delivery zones and the free-shipping rule
//! - [`message`] - Retail and wholesale order message rendering
//! - [`whatsapp`] - Phone normalization and deep-link construction
//! - [`money`] - Guaraní display formatting
//! - [`customer`] - Checkout customer data and send-gating validation
//! - [`catalog`] - Product feed records
//! - [`config`] - Environment-based configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod customer;
pub mod message;
pub mod money;
pub mod order;
pub mod shipping;
pub mod store;
pub mod whatsapp;

pub use catalog::{CatalogError, Product};
pub use config::{ConfigError, StoreConfig};
pub use customer::{Customer, validate_checkout};
pub use money::format_gs;
pub use order::{
    MAX_CANTIDAD, OrderItem, OrderState, Payment, ProductRef, TipoVenta, normalize_quantity,
};
pub use shipping::{CityId, FREE_SHIPPING_MIN, shipping_cost};
pub use store::{
    CUSTOMER_KEY, CustomerStore, FileStorage, MemoryStorage, ORDER_KEY, OrderStore, Storage,
};
pub use whatsapp::{normalize_phone, wa_url};
