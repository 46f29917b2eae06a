use restaurant_orders_api::{
    cart::Cart,
    catalog::MenuCatalog,
    error::ValidationError,
    models::{OrderForm, PaymentMethod},
    services::order_assembler::{ORDER_CHANNEL, assemble},
};
use rust_decimal::Decimal;

fn cart() -> Cart {
    let menu = MenuCatalog::house_menu();
    let mut cart = Cart::new();
    cart.add_item(menu.get("2").unwrap());
    cart.add_item(menu.get("2").unwrap());
    cart.add_item(menu.get("6").unwrap());
    cart
}

fn form() -> OrderForm {
    OrderForm {
        name: "  Ana ".into(),
        phone: "11999999999".into(),
        address: "Rua A, 1".into(),
        payment_method: PaymentMethod::Pix,
    }
}

#[test]
fn builds_header_and_items_from_cart() {
    let assembled = assemble(&cart(), &form()).unwrap();

    assert_eq!(assembled.order.customer_name, "Ana");
    assert_eq!(assembled.order.whatsapp, "11999999999");
    assert_eq!(assembled.order.total_value, Decimal::new(9800, 2));
    assert_eq!(assembled.order.channel, ORDER_CHANNEL);
    assert_eq!(assembled.items.len(), 2);

    let burger = &assembled.items[0];
    assert_eq!(burger.product_name, "Burger Industrial");
    assert_eq!(burger.unit_price, Decimal::new(4200, 2));
    assert_eq!(burger.quantity, 2);
    assert_eq!(burger.subtotal, Decimal::new(8400, 2));

    let items_total: Decimal = assembled.items.iter().map(|i| i.subtotal).sum();
    assert_eq!(items_total, assembled.order.total_value);
}

#[test]
fn summary_lists_customer_items_and_total() {
    let assembled = assemble(&cart(), &form()).unwrap();
    let expected = "*NOVO PEDIDO - SRA GASTRONOMIA* 🍽️\n\n\
                    *Cliente:* Ana\n\
                    *WhatsApp:* 11999999999\n\
                    *Endereço:* Rua A, 1\n\
                    *Pagamento:* PIX\n\n\
                    *Pedido:*\n\
                    • 2x Burger Industrial\n\
                    • 1x Soda Italiana Artesanal\n\n\
                    *Total: R$ 98.00*";
    assert_eq!(assembled.summary, expected);
}

#[test]
fn notification_carries_order_id_and_lines() {
    let assembled = assemble(&cart(), &form()).unwrap();
    let notification = assembled.notification(42);

    assert_eq!(notification.order_id, 42);
    assert_eq!(notification.customer.address, "Rua A, 1");
    assert_eq!(notification.order.items.len(), 2);
    assert_eq!(notification.order.total, Decimal::new(9800, 2));
    assert_eq!(notification.order.payment, PaymentMethod::Pix);
}

#[test]
fn rejects_empty_cart() {
    let err = assemble(&Cart::new(), &form()).unwrap_err();
    assert!(matches!(err, ValidationError::EmptyCart));
}

#[test]
fn rejects_blank_fields() {
    for field in ["name", "phone", "address"] {
        let mut f = form();
        match field {
            "name" => f.name = " ".into(),
            "phone" => f.phone = String::new(),
            _ => f.address = "\t".into(),
        }
        let err = assemble(&cart(), &f).unwrap_err();
        assert!(matches!(err, ValidationError::BlankField(name) if name == field));
    }
}
