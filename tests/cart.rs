use restaurant_orders_api::{
    cart::Cart,
    catalog::MenuCatalog,
    models::{CartLine, Category},
};
use rust_decimal::Decimal;

#[test]
fn adding_same_product_twice_merges_lines() {
    let menu = MenuCatalog::house_menu();
    let burger = menu.get("2").unwrap();

    let mut cart = Cart::new();
    cart.add_item(burger);
    cart.add_item(burger);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), Decimal::new(8400, 2));
}

#[test]
fn decrement_to_zero_removes_line_and_further_decrements_are_ignored() {
    let menu = MenuCatalog::house_menu();
    let mut cart = Cart::new();
    cart.add_item(menu.get("3").unwrap());
    cart.add_item(menu.get("6").unwrap());

    cart.update_quantity("3", -1);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].product.id, "6");

    cart.update_quantity("3", -1);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.total(), Decimal::new(1400, 2));
}

#[test]
fn large_negative_delta_removes_line() {
    let menu = MenuCatalog::house_menu();
    let mut cart = Cart::new();
    cart.add_item(menu.get("1").unwrap());
    cart.update_quantity("1", 4);
    assert_eq!(cart.lines()[0].quantity, 5);

    cart.update_quantity("1", i32::MIN);
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn unknown_product_is_a_no_op() {
    let menu = MenuCatalog::house_menu();
    let mut cart = Cart::new();
    cart.add_item(menu.get("5").unwrap());
    let before = cart.clone();

    cart.update_quantity("999", 3);
    cart.update_quantity("999", -3);

    assert_eq!(cart, before);
}

#[test]
fn clear_empties_the_cart() {
    let menu = MenuCatalog::house_menu();
    let mut cart = Cart::new();
    cart.add_item(menu.get("1").unwrap());
    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
}

// Pseudo-random walk over adds and quantity changes; invariants must hold after every step.
#[test]
fn random_operations_keep_cart_consistent() {
    let menu = MenuCatalog::house_menu();
    let products = menu.list(None);
    let mut cart = Cart::new();
    let mut seed: u64 = 0x5eed;

    for _ in 0..2_000 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let pick = &products[(seed >> 33) as usize % products.len()];
        if (seed >> 20) % 3 == 0 {
            cart.add_item(pick);
        } else {
            let delta = ((seed >> 40) % 7) as i32 - 3;
            cart.update_quantity(&pick.id, delta);
        }

        let expected: Decimal = cart
            .lines()
            .iter()
            .map(|l| l.product.price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(cart.total(), expected);
        assert!(cart.lines().iter().all(|l: &CartLine| l.quantity >= 1));

        let mut ids: Vec<&str> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.lines().len());
    }
}

#[test]
fn house_menu_lists_and_filters() {
    let menu = MenuCatalog::house_menu();
    assert_eq!(menu.list(None).len(), 6);

    let drinks = menu.list(Some(Category::Bebida));
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].name, "Soda Italiana Artesanal");

    let mains = menu.list(Some(Category::Principal));
    assert_eq!(mains.len(), 2);
    assert!(mains.iter().all(|p| p.category == Category::Principal));

    assert_eq!(menu.get("1").unwrap().price, Decimal::new(8990, 2));
    assert!(menu.get("missing").is_none());
}
