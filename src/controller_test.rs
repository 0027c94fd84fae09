#![allow(clippy::float_cmp)]

use serde_json::{Value, json};

use super::*;
use crate::badge::BadgeDisplay;
use crate::cart::Cart;
use crate::price::PriceError;
use crate::store::{JsonCartStore, MemoryStorage};

// =============================================================
// Helpers
// =============================================================

const KEY: &str = "bellyFullCart";

#[derive(Default)]
struct RecordingBadge {
    views: Vec<BadgeView>,
}

impl BadgeSink for RecordingBadge {
    fn render(&mut self, view: &BadgeView) {
        self.views.push(view.clone());
    }
}

#[derive(Default)]
struct RecordingNotifier {
    events: Vec<CartEvent>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, event: &CartEvent) {
        self.events.push(event.clone());
    }
}

type TestController = CartController<JsonCartStore<MemoryStorage>, RecordingBadge, RecordingNotifier>;

fn controller_with(storage: MemoryStorage, config: &CartConfig) -> TestController {
    CartController::new(
        JsonCartStore::new(storage, config.storage_key.clone()),
        RecordingBadge::default(),
        RecordingNotifier::default(),
        config,
    )
}

fn controller(storage: MemoryStorage) -> TestController {
    controller_with(storage, &CartConfig::default())
}

fn card(id: &str, name: &str, price: &str) -> CardFields {
    CardFields {
        id: Some(id.to_owned()),
        name: Some(name.to_owned()),
        price_text: Some(price.to_owned()),
        image_src: Some(format!("https://shop.test/img/{id}.png")),
    }
}

fn stored(storage: &MemoryStorage) -> Value {
    storage
        .raw(KEY)
        .map_or(Value::Null, |raw| serde_json::from_str(&raw).unwrap())
}

fn last_badge(controller: &TestController) -> BadgeView {
    controller.badge().views.last().cloned().unwrap()
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_default_accepts_marker_or_legacy_text() {
    let mut controller = controller(MemoryStorage::new());
    let buttons = [
        ButtonCandidate { text: "Add".to_owned(), action: Some("add".to_owned()) },
        ButtonCandidate { text: "Order now".to_owned(), action: None },
        ButtonCandidate { text: "See menu".to_owned(), action: None },
        ButtonCandidate { text: "Add to Cart".to_owned(), action: None },
    ];

    assert_eq!(controller.initialize(&buttons), vec![0, 1, 3]);
}

#[test]
fn initialize_marker_mode_ignores_unmarked_buttons() {
    let config = CartConfig { button_selection: ButtonSelection::Marker, ..CartConfig::default() };
    let mut controller = controller_with(MemoryStorage::new(), &config);
    let buttons = [
        ButtonCandidate { text: "Add to Cart".to_owned(), action: Some("add".to_owned()) },
        ButtonCandidate { text: "Order now".to_owned(), action: None },
        ButtonCandidate { text: "Add".to_owned(), action: Some("add".to_owned()) },
    ];

    assert_eq!(controller.initialize(&buttons), vec![0, 2]);
}

#[test]
fn initialize_legacy_mode_matches_button_text() {
    let config = CartConfig { button_selection: ButtonSelection::LegacyText, ..CartConfig::default() };
    let mut controller = controller_with(MemoryStorage::new(), &config);
    let buttons = [
        ButtonCandidate { text: "Add to Cart".to_owned(), action: None },
        ButtonCandidate { text: "See menu".to_owned(), action: None },
        ButtonCandidate { text: "ORDER NOW".to_owned(), action: None },
    ];

    assert_eq!(controller.initialize(&buttons), vec![0, 2]);
}

#[test]
fn initialize_renders_badge_from_existing_cart() {
    let storage = MemoryStorage::new().with_item(
        KEY,
        r#"[{"id":"p1","name":"Burger","price":9.5,"imageSrc":"/b.png","quantity":2},
            {"id":"p2","name":"Soda","price":1.5,"imageSrc":"/s.png","quantity":3}]"#,
    );
    let mut controller = controller(storage);

    controller.initialize(std::iter::empty::<&ButtonCandidate>());

    let badge = last_badge(&controller);
    assert_eq!(badge.text, "5");
    assert_eq!(badge.display, BadgeDisplay::InlineBlock);
}

#[test]
fn initialize_hides_badge_for_empty_storage() {
    let mut controller = controller(MemoryStorage::new());
    controller.initialize(std::iter::empty::<&ButtonCandidate>());

    let badge = last_badge(&controller);
    assert_eq!(badge.text, "0");
    assert_eq!(badge.display, BadgeDisplay::None);
}

#[test]
fn initialize_counts_cart_with_null_price_entry() {
    let storage = MemoryStorage::new().with_item(
        KEY,
        r#"[{"id":"p1","name":"Burger","price":9.5,"imageSrc":"/b.png","quantity":2},
            {"id":"p2","name":"Soda","price":null,"imageSrc":"/s.png","quantity":1}]"#,
    );
    let mut controller = controller(storage.clone());

    controller.initialize(std::iter::empty::<&ButtonCandidate>());
    assert_eq!(last_badge(&controller).text, "3");

    controller.add_item_to_cart(CartLineItem::new("p3", "Fries", 3.0, "/f.png")).unwrap();

    let saved = stored(&storage);
    assert_eq!(saved.as_array().map(Vec::len), Some(3));
    assert_eq!(saved[0]["quantity"], 2);
    assert_eq!(saved[1]["id"], "p2");
    assert_eq!(saved[1]["price"], Value::Null);
    assert_eq!(saved[2]["id"], "p3");
    assert_eq!(last_badge(&controller).text, "4");
}

// =============================================================
// on_add_click
// =============================================================

#[test]
fn burger_scenario_adds_then_increments() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());

    let first = controller.on_add_click(Some(card("p1", "Burger", "$9.50"))).unwrap();
    assert_eq!(first, ClickOutcome::Added(AddOutcome::Appended));
    assert_eq!(
        stored(&storage),
        json!([{
            "id": "p1",
            "name": "Burger",
            "price": 9.5,
            "imageSrc": "https://shop.test/img/p1.png",
            "quantity": 1
        }])
    );
    assert_eq!(last_badge(&controller).text, "1");
    assert_eq!(last_badge(&controller).display, BadgeDisplay::InlineBlock);
    assert_eq!(
        controller.notifier().events.last().and_then(CartEvent::message).as_deref(),
        Some("\"Burger\" has been added to your cart!")
    );

    let second = controller.on_add_click(Some(card("p1", "Burger", "$9.50"))).unwrap();
    assert_eq!(second, ClickOutcome::Added(AddOutcome::Incremented { quantity: 2 }));
    assert_eq!(stored(&storage)[0]["quantity"], 2);
    assert_eq!(stored(&storage).as_array().map(Vec::len), Some(1));
    assert_eq!(last_badge(&controller).text, "2");
}

#[test]
fn click_outside_card_is_ignored_silently() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());

    let outcome = controller.on_add_click(None).unwrap();

    assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::NoCard));
    assert_eq!(storage.raw(KEY), None);
    assert!(controller.notifier().events.is_empty());
    assert!(controller.badge().views.is_empty());
}

#[test]
fn click_on_card_without_id_is_ignored() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());
    let fields = CardFields { id: None, ..card("p1", "Burger", "$9.50") };

    let outcome = controller.on_add_click(Some(fields)).unwrap();

    assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::Missing(MissingField::Id)));
    assert_eq!(storage.raw(KEY), None);
}

#[test]
fn unparseable_price_is_rejected_by_default() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());

    let err = controller.on_add_click(Some(card("p9", "Special", "$Ask us"))).unwrap_err();

    assert!(matches!(err, CartError::Price(PriceError::NotANumber { .. })));
    assert_eq!(storage.raw(KEY), None);
    assert!(matches!(
        controller.notifier().events.as_slice(),
        [CartEvent::PriceRejected { id, .. }] if id == "p9"
    ));
}

#[test]
fn unparseable_price_stores_zero_under_zero_policy() {
    let storage = MemoryStorage::new();
    let config = CartConfig { price_failure: PriceFailurePolicy::Zero, ..CartConfig::default() };
    let mut controller = controller_with(storage.clone(), &config);

    controller.on_add_click(Some(card("p9", "Special", "$Ask us"))).unwrap();

    assert_eq!(stored(&storage)[0]["price"], 0.0);
    assert_eq!(stored(&storage)[0]["quantity"], 1);
}

#[test]
fn price_with_trailing_text_parses_leading_amount() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());

    controller.on_add_click(Some(card("p1", "Burger", "$9.50 each"))).unwrap();
    controller.on_add_click(Some(card("p2", "Curry", "$12.00/plate"))).unwrap();

    assert_eq!(stored(&storage)[0]["price"], 9.5);
    assert_eq!(stored(&storage)[1]["price"], 12.0);
}

#[test]
fn unparseable_price_stores_null_under_store_null_policy() {
    let storage = MemoryStorage::new();
    let config = CartConfig { price_failure: PriceFailurePolicy::StoreNull, ..CartConfig::default() };
    let mut controller = controller_with(storage.clone(), &config);

    controller.on_add_click(Some(card("p9", "Special", "$Ask us"))).unwrap();
    controller.on_add_click(Some(card("p9", "Special", "$Ask us"))).unwrap();

    assert_eq!(stored(&storage)[0]["price"], Value::Null);
    assert_eq!(stored(&storage)[0]["quantity"], 2);
    assert_eq!(last_badge(&controller).text, "2");
}

// =============================================================
// add_item_to_cart
// =============================================================

#[test]
fn add_keeps_prior_entries_in_order() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());

    controller.add_item_to_cart(CartLineItem::new("a", "Ramen", 11.0, "/a.png")).unwrap();
    controller.add_item_to_cart(CartLineItem::new("b", "Gyoza", 6.0, "/b.png")).unwrap();
    controller.add_item_to_cart(CartLineItem::new("c", "Tea", 2.0, "/c.png")).unwrap();

    let ids: Vec<String> = controller.store().load().items().map(|item| item.id.clone()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn repeat_add_keeps_first_stored_fields() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());

    controller.add_item_to_cart(CartLineItem::new("p1", "Burger", 9.5, "/old.png")).unwrap();
    controller.add_item_to_cart(CartLineItem::new("p1", "Mega Burger", 14.0, "/new.png")).unwrap();

    let cart = controller.store().load();
    let entry = cart.get("p1").unwrap();
    assert_eq!(entry.name, "Burger");
    assert_eq!(entry.price, Some(9.5));
    assert_eq!(entry.image_src, "/old.png");
    assert_eq!(entry.quantity, 2);
}

#[test]
fn confirmation_names_the_clicked_item() {
    let mut controller = controller(MemoryStorage::new());
    controller.add_item_to_cart(CartLineItem::new("p1", "Burger", 9.5, "/b.png")).unwrap();
    controller.add_item_to_cart(CartLineItem::new("p1", "Mega Burger", 14.0, "/b.png")).unwrap();

    assert_eq!(
        controller.notifier().events.last(),
        Some(&CartEvent::ItemAdded { id: "p1".to_owned(), name: "Mega Burger".to_owned(), quantity: 2, total: 2 })
    );
}

#[test]
fn corrupt_storage_is_replaced_on_add() {
    let storage = MemoryStorage::new().with_item(KEY, "][");
    let mut controller = controller(storage.clone());

    controller.add_item_to_cart(CartLineItem::new("p1", "Burger", 9.5, "/b.png")).unwrap();

    assert_eq!(stored(&storage).as_array().map(Vec::len), Some(1));
    assert_eq!(last_badge(&controller).text, "1");
}

#[test]
fn save_failure_returns_error_without_confirmation() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());
    controller.add_item_to_cart(CartLineItem::new("p1", "Burger", 9.5, "/b.png")).unwrap();
    storage.set_fail_writes(true);

    let err = controller.add_item_to_cart(CartLineItem::new("p2", "Fries", 3.0, "/f.png")).unwrap_err();

    assert!(matches!(err, CartError::Store(_)));
    assert_eq!(controller.notifier().events.len(), 1);
    assert_eq!(last_badge(&controller).text, "1");
}

#[test]
fn saved_cart_round_trips_through_store() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage.clone());
    let mut expected = Cart::new();
    for (id, name) in [("a", "Pho"), ("b", "Banh mi"), ("a", "Pho"), ("c", "Iced coffee")] {
        let item = CartLineItem::new(id, name, 4.5, format!("/{id}.png"));
        expected.add(item.clone());
        controller.add_item_to_cart(item).unwrap();
    }

    let reread = JsonCartStore::new(storage, KEY).load();
    assert_eq!(reread, expected);
}

// =============================================================
// update_cart_icon
// =============================================================

#[test]
fn badge_total_sums_quantities() {
    let mut controller = controller(MemoryStorage::new());
    controller.add_item_to_cart(CartLineItem::new("p1", "Burger", 9.5, "/b.png")).unwrap();
    controller.add_item_to_cart(CartLineItem::new("p1", "Burger", 9.5, "/b.png")).unwrap();
    controller.add_item_to_cart(CartLineItem::new("p2", "Fries", 3.0, "/f.png")).unwrap();

    assert_eq!(controller.update_cart_icon().total, 3);
}

#[test]
fn update_cart_icon_is_idempotent() {
    let storage = MemoryStorage::new();
    let mut controller = controller(storage);
    controller.add_item_to_cart(CartLineItem::new("p1", "Burger", 9.5, "/b.png")).unwrap();

    let first = controller.update_cart_icon();
    let second = controller.update_cart_icon();

    assert_eq!(first, second);
    assert_eq!(first.text, "1");
}
