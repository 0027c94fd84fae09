use super::*;

fn text_button(text: &str) -> ButtonCandidate {
    ButtonCandidate { text: text.to_owned(), action: None }
}

fn marked_button(text: &str) -> ButtonCandidate {
    ButtonCandidate { text: text.to_owned(), action: Some("add".to_owned()) }
}

fn full_card() -> CardFields {
    CardFields {
        id: Some("p1".to_owned()),
        name: Some("Burger".to_owned()),
        price_text: Some("$9.50".to_owned()),
        image_src: Some("https://shop.test/burger.png".to_owned()),
    }
}

#[test]
fn marker_selection_ignores_text() {
    assert!(ButtonSelection::Marker.accepts(&marked_button("Yum")));
    assert!(!ButtonSelection::Marker.accepts(&text_button("Add to Cart")));
}

#[test]
fn marker_value_is_trimmed_and_case_insensitive() {
    let button = ButtonCandidate { text: String::new(), action: Some(" ADD ".to_owned()) };
    assert!(ButtonSelection::Marker.accepts(&button));

    let other = ButtonCandidate { text: String::new(), action: Some("remove".to_owned()) };
    assert!(!ButtonSelection::Marker.accepts(&other));
}

#[test]
fn legacy_text_matches_cart_and_order_substrings() {
    assert!(ButtonSelection::LegacyText.accepts(&text_button("Add to Cart")));
    assert!(ButtonSelection::LegacyText.accepts(&text_button("ORDER NOW")));
    assert!(ButtonSelection::LegacyText.accepts(&text_button("Reorder")));
    assert!(!ButtonSelection::LegacyText.accepts(&text_button("View Menu")));
}

#[test]
fn legacy_text_accepts_false_positives() {
    assert!(ButtonSelection::LegacyText.accepts(&text_button("Order history")));
    assert!(ButtonSelection::LegacyText.accepts(&text_button("Go to cart")));
}

#[test]
fn marker_or_text_accepts_either() {
    assert!(ButtonSelection::MarkerOrText.accepts(&marked_button("Yum")));
    assert!(ButtonSelection::MarkerOrText.accepts(&text_button("Add to cart")));
    assert!(!ButtonSelection::MarkerOrText.accepts(&text_button("Details")));
}

#[test]
fn complete_card_yields_product() {
    let card = full_card().complete().unwrap();
    assert_eq!(card.id, "p1");
    assert_eq!(card.name, "Burger");
    assert_eq!(card.price_text, "$9.50");
}

#[test]
fn missing_fields_are_reported_in_order() {
    assert_eq!(CardFields::default().complete(), Err(MissingField::Id));
    assert_eq!(CardFields { id: Some("  ".to_owned()), ..full_card() }.complete(), Err(MissingField::Id));
    assert_eq!(CardFields { name: None, ..full_card() }.complete(), Err(MissingField::Name));
    assert_eq!(CardFields { price_text: None, ..full_card() }.complete(), Err(MissingField::Price));
    assert_eq!(CardFields { image_src: None, ..full_card() }.complete(), Err(MissingField::Image));
}
