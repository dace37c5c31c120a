use canvas_assist::error::AssistError;
use canvas_assist::fill::field_spec::{FieldSpec, apply_dummy_data, round_robin_fill};
use canvas_assist::fill::image::{ImageKind, MIN_IMAGE_SIZE, apply_image_fill, image_url};
use canvas_assist::node::fingerprint::{fingerprint, stable_seed};
use canvas_assist::node::host::DocumentHost;
use canvas_assist::node::memory::MemoryDocument;
use canvas_assist::node::node_model::{Paint, ScaleMode};

use crate::common::fixtures::{STUB_IMAGE, StubImages, doc, frame, rect, text};

mod common;

fn characters(document: &MemoryDocument, id: &str) -> String {
    document
        .resolve_node(id)
        .and_then(|n| n.characters.clone())
        .unwrap_or_default()
}

// =========================================================================
// FieldSpec cursor
// =========================================================================

#[test]
fn cursor_wraps_after_the_last_value() {
    let mut field = FieldSpec::new("name", &["A", "B", "C"]);
    let taken: Vec<String> = (0..4).filter_map(|_| field.next_value()).collect();
    assert_eq!(taken, vec!["A", "B", "C", "A"], "N+1-th value reuses value[0]");

    field.reset();
    assert_eq!(field.next_value().as_deref(), Some("A"));
}

#[test]
fn empty_field_yields_nothing() {
    let mut field = FieldSpec::new("name", &[]);
    assert_eq!(field.next_value(), None);
}

// =========================================================================
// Round-robin fill
// =========================================================================

#[test]
fn single_field_fills_every_text_in_order() {
    let tree = frame(
        "list",
        "List",
        vec![
            text("t1", "Item", "-"),
            text("t2", "Item", "-"),
            text("t3", "Item", "-"),
        ],
    );
    let mut document = doc(vec![tree], &["list"]);
    let mut fields = vec![FieldSpec::new("name", &["홍길동", "김철수"])];

    let outcome = round_robin_fill(&mut document, &mut fields).unwrap();
    assert_eq!(outcome.changed, 3);
    assert_eq!(outcome.message, "3개의 텍스트에 데이터를 순서대로 적용했습니다.");
    assert_eq!(characters(&document, "t1"), "홍길동");
    assert_eq!(characters(&document, "t2"), "김철수");
    assert_eq!(characters(&document, "t3"), "홍길동");
}

#[test]
fn fields_are_matched_by_layer_name_ignoring_case() {
    let tree = frame(
        "card",
        "Card",
        vec![
            text("n1", "Name", "-"),
            text("j1", "job", "-"),
            text("n2", "NAME", "-"),
            text("x", "Caption", "keep"),
        ],
    );
    let mut document = doc(vec![tree], &["card"]);
    let mut fields = vec![
        FieldSpec::new("name", &["A", "B"]),
        FieldSpec::new("Job", &["개발자"]),
    ];

    let outcome = round_robin_fill(&mut document, &mut fields).unwrap();
    assert_eq!(outcome.changed, 4);
    assert_eq!(characters(&document, "n1"), "A");
    assert_eq!(characters(&document, "j1"), "개발자");
    assert_eq!(characters(&document, "n2"), "B");
    assert_eq!(characters(&document, "x"), "A", "Unnamed leaf takes the first field, wrapped");
}

#[test]
fn unmatched_layers_take_fields_in_turn() {
    let tree = frame(
        "card",
        "Card",
        vec![
            text("t1", "Text", "-"),
            text("t2", "Text", "-"),
            text("t3", "Text", "-"),
        ],
    );
    let mut document = doc(vec![tree], &["card"]);
    let mut fields = vec![
        FieldSpec::new("name", &["홍길동", "김철수"]),
        FieldSpec::new("job", &["개발자"]),
    ];

    let outcome = round_robin_fill(&mut document, &mut fields).unwrap();
    assert_eq!(outcome.changed, 3);
    assert_eq!(characters(&document, "t1"), "홍길동");
    assert_eq!(characters(&document, "t2"), "개발자");
    assert_eq!(characters(&document, "t3"), "김철수");
}

#[test]
fn fields_without_values_are_zero_effect() {
    let mut document = doc(vec![text("t", "Caption", "keep")], &["t"]);
    let mut fields = vec![FieldSpec::new("a", &[]), FieldSpec::new("b", &[])];
    assert!(matches!(
        round_robin_fill(&mut document, &mut fields),
        Err(AssistError::ZeroEffect(_))
    ));
    assert_eq!(characters(&document, "t"), "keep");
}

#[test]
fn dummy_data_overwrites_all_text() {
    let tree = frame(
        "card",
        "Card",
        vec![text("a", "A", "1"), text("b", "B", "2")],
    );
    let mut document = doc(vec![tree], &["card"]);
    let outcome = apply_dummy_data(&mut document, "Lorem").unwrap();
    assert_eq!(outcome.message, "2개의 텍스트에 데이터를 적용했습니다.");
    assert_eq!(characters(&document, "a"), "Lorem");
    assert_eq!(characters(&document, "b"), "Lorem");
}

// =========================================================================
// Image fill
// =========================================================================

#[test]
fn image_urls_are_sized_and_seeded() {
    let url = image_url(ImageKind::Nature, 40.0, 300.0, 7, MIN_IMAGE_SIZE);
    assert_eq!(url, "https://picsum.photos/seed/nature7/100/300");

    let profile = image_url(ImageKind::Profile, 10.0, 10.0, 3, MIN_IMAGE_SIZE);
    assert!(profile.starts_with("https://i.pravatar.cc/"));
}

#[test]
fn unknown_kinds_fall_back_to_other() {
    assert_eq!("FOOD".parse::<ImageKind>(), Ok(ImageKind::Food));
    assert_eq!("banana".parse::<ImageKind>(), Ok(ImageKind::Other));
}

#[test]
fn image_fill_installs_fetched_image() {
    let tree = frame(
        "card",
        "Card",
        vec![rect("photo", "Photo", "#cccccc"), text("t", "Title", "x")],
    );
    let mut document = doc(vec![tree], &["card"]);
    let images = StubImages::default();

    let outcome = apply_image_fill(&mut document, &images, ImageKind::Cover, MIN_IMAGE_SIZE).unwrap();
    assert_eq!(outcome.message, "1개의 레이어에 이미지를 적용했습니다.");

    let requested = images.requested.borrow();
    let seed = stable_seed("photo", 1000);
    assert_eq!(
        requested.as_slice(),
        [format!("https://picsum.photos/seed/{seed}/100/100")]
    );

    let fills = document.resolve_node("photo").unwrap().fills.clone().unwrap();
    assert_eq!(
        fills,
        vec![Paint::Image {
            image_hash: fingerprint(STUB_IMAGE),
            scale_mode: ScaleMode::Fill,
            visible: true,
            opacity: 1.0,
        }]
    );
}

#[test]
fn existing_image_paints_keep_their_presentation() {
    let mut photo = rect("photo", "Photo", "#cccccc");
    photo.fills = Some(vec![Paint::Image {
        image_hash: "old".into(),
        scale_mode: ScaleMode::Fit,
        visible: true,
        opacity: 0.4,
    }]);
    let mut document = doc(vec![photo], &["photo"]);

    apply_image_fill(&mut document, &StubImages::default(), ImageKind::Post, MIN_IMAGE_SIZE).unwrap();
    match &document.resolve_node("photo").unwrap().fills.as_ref().unwrap()[0] {
        Paint::Image {
            image_hash,
            scale_mode,
            opacity,
            ..
        } => {
            assert_eq!(image_hash, &fingerprint(STUB_IMAGE));
            assert_eq!(*scale_mode, ScaleMode::Fit);
            assert!((opacity - 0.4).abs() < 1e-9);
        }
        other => panic!("Expected image paint, got {other:?}"),
    }
}

#[test]
fn failed_fetches_are_reported_as_zero_effect() {
    let mut document = doc(vec![rect("photo", "Photo", "#cccccc")], &["photo"]);
    match apply_image_fill(&mut document, &StubImages::failing(), ImageKind::Food, MIN_IMAGE_SIZE) {
        Err(AssistError::ZeroEffect(message)) => {
            assert_eq!(message, "이미지를 적용하는데 실패했습니다.")
        }
        other => panic!("Expected ZeroEffect, got {other:?}"),
    }
}

#[test]
fn selection_without_image_slots_is_rejected() {
    let mut document = doc(vec![text("t", "Title", "x")], &["t"]);
    match apply_image_fill(&mut document, &StubImages::default(), ImageKind::Other, MIN_IMAGE_SIZE) {
        Err(AssistError::ZeroEffect(message)) => assert!(message.contains("Rectangle")),
        other => panic!("Expected ZeroEffect, got {other:?}"),
    }
}
