//! Cart commands: the CLI stands in for the storefront's cart and checkout
//! pages, driving the core against a file-backed storage.
//!
//! # Environment Variables
//!
//! - `MBARETE_WHATSAPP_PHONE` - Destination number for `enviar`
//! - `MBARETE_FREE_SHIPPING_MIN` - Free-shipping threshold override

use std::path::Path;

use thiserror::Error;

use mbarete_core::catalog::{self, CatalogError};
use mbarete_core::config::{ConfigError, StoreConfig};
use mbarete_core::order::ParsePaymentError;
use mbarete_core::shipping::{ParseCityError, shipping_cost};
use mbarete_core::store::{CustomerStore, FileStorage, OrderStore};
use mbarete_core::{CityId, Payment, ProductRef, format_gs, message, validate_checkout, wa_url};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum PedidoError {
    /// Catalog feed could not be loaded.
    #[error(transparent)]
    Catalogo(#[from] CatalogError),

    /// Requested slug is not in the feed.
    #[error("Producto no encontrado en el catálogo: {0}")]
    ProductoNoEncontrado(String),

    /// Unknown delivery zone.
    #[error(transparent)]
    Ciudad(#[from] ParseCityError),

    /// Unknown payment method.
    #[error(transparent)]
    Pago(#[from] ParsePaymentError),

    /// Bad configuration in the environment.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The order is missing required choices; one message per deficiency.
    #[error("El pedido no se puede enviar:\n{}", .0.join("\n"))]
    Incompleto(Vec<String>),
}

fn order_store(datos: &Path) -> OrderStore<FileStorage> {
    OrderStore::new(FileStorage::new(datos))
}

fn customer_store(datos: &Path) -> CustomerStore<FileStorage> {
    CustomerStore::new(FileStorage::new(datos))
}

/// Add one unit of the product with `slug` from the catalog feed.
pub fn agregar(datos: &Path, catalogo: &Path, slug: &str) -> Result<(), PedidoError> {
    let feed = catalog::load_catalog(catalogo)?;
    let product = catalog::find_by_slug(&feed, slug)
        .ok_or_else(|| PedidoError::ProductoNoEncontrado(slug.to_owned()))?;

    let mut store = order_store(datos);
    let mut state = store.load();
    state.add_item(&ProductRef::from(product));
    store.save(&state);

    println!("Agregado: {} ({} ítems en el pedido)", product.nombre, state.item_count());
    Ok(())
}

/// Print the cart with derived totals.
pub fn listar(datos: &Path) -> Result<(), PedidoError> {
    let config = StoreConfig::from_env()?;
    let state = order_store(datos).load();

    if state.is_empty() {
        println!("Tu pedido está vacío.");
        return Ok(());
    }

    for item in &state.items {
        println!(
            "- {}{} {} = Gs. {}",
            item.cantidad,
            item.tipo_venta.suffix(),
            item.nombre,
            format_gs(item.line_total())
        );
    }

    let sub = state.subtotal();
    let ship = shipping_cost(sub, state.city_id, config.free_shipping_min);
    println!();
    println!("Subtotal: Gs. {}", format_gs(sub));
    match state.city_id {
        Some(city) => println!("Ciudad: {} (Envío Gs. {})", city.label(), format_gs(ship)),
        None => println!("Ciudad: (elegir)"),
    }
    println!("Total: Gs. {}", format_gs(sub.saturating_add(ship)));
    match state.payment {
        Some(payment) => println!("Pago: {}", payment.label()),
        None => println!("Pago: A definir"),
    }
    Ok(())
}

/// Set an item quantity; fractional or non-positive input is clamped.
pub fn cantidad(datos: &Path, slug: &str, cantidad: f64) -> Result<(), PedidoError> {
    let mut store = order_store(datos);
    let mut state = store.load();
    state.update_qty(slug, cantidad);
    store.save(&state);
    listar(datos)
}

/// Remove an item; unknown slugs are a silent no-op, like the storefront.
pub fn quitar(datos: &Path, slug: &str) -> Result<(), PedidoError> {
    let mut store = order_store(datos);
    let mut state = store.load();
    state.remove_item(slug);
    store.save(&state);
    listar(datos)
}

/// Empty the cart.
pub fn vaciar(datos: &Path) {
    order_store(datos).clear();
    println!("Pedido vaciado.");
}

/// Choose the delivery zone.
pub fn ciudad(datos: &Path, ciudad: &str) -> Result<(), PedidoError> {
    let city: CityId = ciudad.parse()?;
    let mut store = order_store(datos);
    let mut state = store.load();
    state.city_id = Some(city);
    store.save(&state);
    println!("Ciudad: {}", city.label());
    Ok(())
}

/// List delivery zones with their costs.
pub fn ciudades() {
    for city in CityId::ALL {
        println!(
            "{:<14} {} (Gs. {})",
            city.as_str(),
            city.label(),
            format_gs(city.cost())
        );
    }
}

/// Choose the payment method.
pub fn pago(datos: &Path, metodo: &str) -> Result<(), PedidoError> {
    let payment: Payment = metodo.parse()?;
    let mut store = order_store(datos);
    let mut state = store.load();
    state.payment = Some(payment);
    store.save(&state);
    println!("Pago: {}", payment.label());
    Ok(())
}

/// Update stored customer details; only the provided fields change.
pub fn cliente(
    datos: &Path,
    nombre: Option<String>,
    doc: Option<String>,
    direccion: Option<String>,
) {
    let mut store = customer_store(datos);
    let mut customer = store.load();
    if let Some(nombre) = nombre {
        customer.nombre = nombre;
    }
    if let Some(doc) = doc {
        customer.doc = doc;
    }
    if let Some(direccion) = direccion {
        customer.direccion = direccion;
    }
    store.save(&customer);
    println!("Cliente: {}", customer.nombre);
}

/// Print the WhatsApp deep link for the order (or wholesale inquiry).
///
/// Refuses while the checkout is incomplete: the storefront disables its
/// send buttons under the same conditions.
pub fn enviar(datos: &Path, mayorista: bool) -> Result<(), PedidoError> {
    let config = StoreConfig::from_env()?;
    let state = order_store(datos).load();
    let customer = customer_store(datos).load();

    let deficiencies = validate_checkout(&state, &customer);
    if !deficiencies.is_empty() {
        return Err(PedidoError::Incompleto(deficiencies));
    }

    let text = if mayorista {
        message::wholesale_inquiry(&state, Some(&customer))
    } else {
        message::normal_order(&state, Some(&customer), config.free_shipping_min)
    };

    println!("{}", wa_url(&config.whatsapp_phone, &text));
    Ok(())
}
