//! CLI command implementations.

pub mod pedido;
pub mod precios;
