//! Checkout customer data and send-gating validation.

use serde::{Deserialize, Serialize};

use crate::order::{OrderState, Payment};

/// Customer details captured by the checkout form.
///
/// Persisted separately from the cart (see [`crate::store::CustomerStore`])
/// so clearing the cart keeps the customer's details around for the next
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Customer {
    /// Required before sending an order.
    pub nombre: String,
    /// CI or RUC, optional free text.
    pub doc: String,
    /// Required only for cash-on-delivery orders.
    pub direccion: String,
}

/// Everything still missing before an order can be sent.
///
/// These are advisory, human-readable deficiency messages: the send actions
/// stay disabled while any exist, but nothing here is an error.
#[must_use]
pub fn validate_checkout(state: &OrderState, customer: &Customer) -> Vec<String> {
    let mut errors = Vec::new();
    if state.is_empty() {
        errors.push("Tu pedido está vacío.".to_owned());
    }
    if customer.nombre.trim().is_empty() {
        errors.push("Falta el nombre del cliente.".to_owned());
    }
    if state.payment == Some(Payment::Puerta) && customer.direccion.trim().is_empty() {
        errors.push("Para pago en puerta necesitás indicar dirección.".to_owned());
    }
    if state.city_id.is_none() {
        errors.push("Seleccioná una ciudad/zona de envío.".to_owned());
    }
    if state.payment.is_none() {
        errors.push("Seleccioná una forma de pago.".to_owned());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{ProductRef, TipoVenta};
    use crate::shipping::CityId;

    fn full_cart() -> OrderState {
        let mut state = OrderState::default();
        state.add_item(&ProductRef {
            slug: "toma-doble".to_owned(),
            nombre: "Toma doble".to_owned(),
            precio_publico: 25_000,
            tipo_venta: TipoVenta::Unidad,
        });
        state.city_id = Some(CityId::Asuncion);
        state.payment = Some(Payment::Transferencia);
        state
    }

    fn full_customer() -> Customer {
        Customer {
            nombre: "Ana Benítez".to_owned(),
            doc: String::new(),
            direccion: String::new(),
        }
    }

    #[test]
    fn test_empty_cart_yields_deficiency() {
        let errors = validate_checkout(&OrderState::default(), &Customer::default());
        assert!(errors.contains(&"Tu pedido está vacío.".to_owned()));
        assert!(errors.contains(&"Falta el nombre del cliente.".to_owned()));
        assert!(errors.contains(&"Seleccioná una ciudad/zona de envío.".to_owned()));
        assert!(errors.contains(&"Seleccioná una forma de pago.".to_owned()));
    }

    #[test]
    fn test_complete_order_has_no_deficiencies() {
        assert!(validate_checkout(&full_cart(), &full_customer()).is_empty());
    }

    #[test]
    fn test_puerta_requires_direccion() {
        let mut state = full_cart();
        state.payment = Some(Payment::Puerta);
        let errors = validate_checkout(&state, &full_customer());
        assert_eq!(
            errors,
            vec!["Para pago en puerta necesitás indicar dirección.".to_owned()]
        );

        let mut customer = full_customer();
        customer.direccion = "Avda. España 1234".to_owned();
        assert!(validate_checkout(&state, &customer).is_empty());
    }

    #[test]
    fn test_whitespace_name_counts_as_missing() {
        let mut customer = full_customer();
        customer.nombre = "   ".to_owned();
        let errors = validate_checkout(&full_cart(), &customer);
        assert_eq!(errors, vec!["Falta el nombre del cliente.".to_owned()]);
    }
}
