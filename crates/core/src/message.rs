//! Deterministic order-message rendering.
//!
//! Two audiences, two variants:
//!
//! - a **normal order** states retail prices, shipping and the grand total;
//! - a **wholesale inquiry** lists only names and quantities, since wholesale
//!   pricing is unknown until negotiated, and asks for per-item minimums.
//!
//! Line order is fixed and covered by golden tests; the output goes verbatim
//! into a WhatsApp deep link, so any change here changes what the store
//! receives.

use crate::customer::Customer;
use crate::money::format_gs;
use crate::order::{OrderState, Payment};
use crate::shipping::shipping_cost;

/// Render the retail order message.
///
/// When a `customer` is given, a client block (name, CI/RUC, and for
/// cash-on-delivery the address) is inserted after the header.
#[must_use]
pub fn normal_order(
    state: &OrderState,
    customer: Option<&Customer>,
    free_shipping_min: u64,
) -> String {
    let sub = state.subtotal();
    let ship = shipping_cost(sub, state.city_id, free_shipping_min);
    let total = sub.saturating_add(ship);

    let mut lines = vec!["Pedido (Precio normal) – Mbarete Eléctrico".to_owned(), String::new()];
    if let Some(customer) = customer {
        push_customer_block(&mut lines, customer, state.payment);
    }
    for item in &state.items {
        lines.push(format!(
            "- {}{} {} = Gs. {}",
            item.cantidad,
            item.tipo_venta.suffix(),
            item.nombre,
            format_gs(item.line_total())
        ));
    }
    lines.push(String::new());
    lines.push(format!("Subtotal: Gs. {}", format_gs(sub)));
    lines.push(city_line(state, Some(ship)));
    lines.push(format!("Total: Gs. {}", format_gs(total)));
    lines.push(format!("Pago: {}", payment_label(state.payment)));
    lines.push(String::new());
    lines.push("¿Confirmamos disponibilidad y coordinamos entrega?".to_owned());
    lines.join("\n")
}

/// Render the wholesale price inquiry: same items, no prices, no total.
#[must_use]
pub fn wholesale_inquiry(state: &OrderState, customer: Option<&Customer>) -> String {
    let mut lines = vec!["Consulta Mayorista – Mbarete Eléctrico".to_owned(), String::new()];
    if let Some(customer) = customer {
        push_customer_block(&mut lines, customer, None);
    }
    for item in &state.items {
        lines.push(format!(
            "- {}{} {}",
            item.cantidad,
            item.tipo_venta.suffix(),
            item.nombre
        ));
    }
    lines.push(String::new());
    lines.push(city_line(state, None));
    lines.push(String::new());
    lines.push("¿Me pasás precio mayorista y cantidad mínima para cada ítem?".to_owned());
    lines.join("\n")
}

fn push_customer_block(lines: &mut Vec<String>, customer: &Customer, payment: Option<Payment>) {
    lines.push(format!("Cliente: {}", customer.nombre.trim()));
    if !customer.doc.trim().is_empty() {
        lines.push(format!("CI/RUC: {}", customer.doc.trim()));
    }
    if payment == Some(Payment::Puerta) && !customer.direccion.trim().is_empty() {
        lines.push(format!("Dirección: {}", customer.direccion.trim()));
    }
    lines.push(String::new());
}

/// `Ciudad:` line; with `ship` the shipping cost is appended (normal orders).
fn city_line(state: &OrderState, ship: Option<u64>) -> String {
    match (state.city_id, ship) {
        (Some(city), Some(ship)) => format!(
            "Ciudad: {} (Envío Gs. {})",
            city.label(),
            format_gs(ship)
        ),
        (Some(city), None) => format!("Ciudad: {}", city.label()),
        (None, _) => "Ciudad: (elegir)".to_owned(),
    }
}

fn payment_label(payment: Option<Payment>) -> &'static str {
    payment.map_or("A definir", Payment::label)
}
