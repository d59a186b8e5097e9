//! End-to-end order flow: catalog pick → cart mutations → persisted state →
//! derived totals → message → deep link.

use mbarete_core::{
    CityId, Customer, FREE_SHIPPING_MIN, MemoryStorage, OrderState, OrderStore, Payment,
    ProductRef, TipoVenta, message, shipping_cost, validate_checkout, wa_url,
};

fn cable() -> ProductRef {
    ProductRef {
        slug: "cable-2.5".to_owned(),
        nombre: "Cable 2.5mm".to_owned(),
        precio_publico: 15_000,
        tipo_venta: TipoVenta::Metro,
    }
}

fn llave() -> ProductRef {
    ProductRef {
        slug: "llave-termica-20a".to_owned(),
        nombre: "Llave térmica 20A".to_owned(),
        precio_publico: 48_000,
        tipo_venta: TipoVenta::Unidad,
    }
}

#[test]
fn empty_cart_cannot_be_sent() {
    let store = OrderStore::new(MemoryStorage::new());
    let state = store.load();
    assert_eq!(state.subtotal(), 0);
    let deficiencies = validate_checkout(&state, &Customer::default());
    assert!(deficiencies.contains(&"Tu pedido está vacío.".to_owned()));
}

#[test]
fn full_retail_order_round_trip() {
    let mut store = OrderStore::new(MemoryStorage::new());

    // Shop: three adds of the same cable collapse into one line
    let mut state = store.load();
    state.add_item(&cable());
    state.add_item(&cable());
    state.add_item(&cable());
    state.add_item(&llave());
    store.save(&state);

    // Fresh load sees the same cart
    let mut state = store.load();
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].cantidad, 3);
    assert_eq!(state.subtotal(), 3 * 15_000 + 48_000);

    // Checkout choices
    state.city_id = Some(CityId::SanLorenzo);
    state.payment = Some(Payment::Transferencia);
    store.save(&state);

    let state = store.load();
    let customer = Customer {
        nombre: "Marta Ruiz".to_owned(),
        doc: String::new(),
        direccion: String::new(),
    };
    assert!(validate_checkout(&state, &customer).is_empty());

    // Below the threshold, San Lorenzo pays 19.000
    let sub = state.subtotal();
    assert_eq!(shipping_cost(sub, state.city_id, FREE_SHIPPING_MIN), 19_000);

    let msg = message::normal_order(&state, Some(&customer), FREE_SHIPPING_MIN);
    assert!(msg.contains("Cliente: Marta Ruiz"));
    assert!(msg.contains("- 3m Cable 2.5mm = Gs. 45.000"));
    assert!(msg.contains("Total: Gs. 112.000"));

    let url = wa_url("0986550235", &msg);
    assert!(url.starts_with("https://wa.me/595986550235?text=Pedido"));
    assert!(!url.contains('\n'));
}

#[test]
fn crossing_the_free_shipping_threshold_zeroes_shipping() {
    let mut state = OrderState::default();
    state.add_item(&cable());
    state.city_id = Some(CityId::Asuncion);

    state.update_qty("cable-2.5", 17.0); // 255.000
    assert_eq!(
        shipping_cost(state.subtotal(), state.city_id, FREE_SHIPPING_MIN),
        17_000
    );

    state.update_qty("cable-2.5", 21.0); // 315.000
    assert_eq!(
        shipping_cost(state.subtotal(), state.city_id, FREE_SHIPPING_MIN),
        0
    );
}

#[test]
fn wholesale_inquiry_keeps_quantities_only() {
    let mut state = OrderState::default();
    state.add_item(&cable());
    state.update_qty("cable-2.5", 100.0);
    state.add_item(&llave());
    state.city_id = Some(CityId::Luque);

    let msg = message::wholesale_inquiry(&state, None);
    assert!(msg.contains("- 100m Cable 2.5mm"));
    assert!(msg.contains("- 1u Llave térmica 20A"));
    assert!(!msg.contains("Gs."));
    assert!(!msg.contains("Subtotal"));
}

#[test]
fn cross_context_write_is_observed() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    // Two stores over the same backing file model two browser tabs.
    let path = std::env::temp_dir().join(format!(
        "mbarete-flow-test-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let mut tab_a = OrderStore::new(mbarete_core::FileStorage::new(&path));
    let mut tab_b = OrderStore::new(mbarete_core::FileStorage::new(&path));

    let badge = Arc::new(AtomicU64::new(0));
    let badge_in_b = Arc::clone(&badge);
    tab_b.subscribe(move |state| {
        badge_in_b.store(state.item_count(), Ordering::SeqCst);
    });

    let mut state = tab_a.load();
    state.add_item(&cable());
    state.add_item(&cable());
    tab_a.save(&state);

    // Tab B reacts to the storage event for the cart key
    let seen = tab_b.external_change(mbarete_core::ORDER_KEY);
    assert_eq!(seen.map(|s| s.item_count()), Some(2));
    assert_eq!(badge.load(Ordering::SeqCst), 2);

    let _ = std::fs::remove_file(&path);
}
