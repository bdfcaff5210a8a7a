#![cfg(target_arch = "wasm32")]

use lang_pair_links::config::ContentConfig;
use lang_pair_links::controller::{PageEvent, PageView};
use lang_pair_links::error::ControllerError;
use lang_pair_links::language_pair::LanguagePair;
use lang_pair_links::ui::DomView;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};
use yew::Callback;

wasm_bindgen_test_configure!(run_in_browser);

const HOST_PAGE: &str = "<header><nav id=\"host-nav\"></nav></header>";

fn document_with_body(html: &str) -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(html);
    document
}

fn create_view() -> DomView {
    DomView::new(ContentConfig::default(), Callback::from(|_: PageEvent| ()))
}

fn create_recording_view() -> (DomView, Rc<RefCell<Vec<PageEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let recorder = events.clone();
    let view = DomView::new(
        ContentConfig::default(),
        Callback::from(move |event: PageEvent| recorder.borrow_mut().push(event)),
    );
    (view, events)
}

/// Let Yew's scheduler finish rendering
async fn settle() {
    yew::platform::time::sleep(Duration::ZERO).await;
}

fn container_count(document: &Document) -> u32 {
    document.query_selector_all("#items-container").unwrap().length()
}

fn chip_labels(document: &Document) -> Vec<String> {
    let chips = document.query_selector_all("#items-container .quick-link-chip").unwrap();
    (0..chips.length())
        .filter_map(|index| chips.get(index))
        .filter_map(|chip| chip.text_content())
        .collect()
}

fn click(document: &Document, selector: &str) {
    document
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

#[wasm_bindgen_test]
fn test_mount_inserts_container_after_nav() {
    let document = document_with_body(HOST_PAGE);
    let view = create_view();

    view.mount(&[LanguagePair::new("en", "fr")]).unwrap();

    let nav = document.get_element_by_id("host-nav").unwrap();
    let container = nav.next_element_sibling().unwrap();
    assert_eq!(container.id(), "items-container");
}

#[wasm_bindgen_test]
async fn test_mount_renders_chip_labels() {
    let document = document_with_body(HOST_PAGE);
    let view = create_view();

    view.mount(&[LanguagePair::new("en", "fr"), LanguagePair::new("de", "it")]).unwrap();
    settle().await;

    assert_eq!(chip_labels(&document), vec!["en:fr".to_string(), "de:it".to_string()]);
    assert_eq!(document.query_selector_all(".quick-link-save").unwrap().length(), 1);
}

#[wasm_bindgen_test]
async fn test_mount_twice_keeps_one_container() {
    let document = document_with_body(HOST_PAGE);
    let view = create_view();
    let items = vec![LanguagePair::new("en", "fr"), LanguagePair::new("de", "it")];

    view.mount(&items).unwrap();
    settle().await;
    let first = chip_labels(&document);
    view.mount(&items).unwrap();
    settle().await;

    assert_eq!(container_count(&document), 1);
    assert_eq!(chip_labels(&document), first);
    assert_eq!(first, vec!["en:fr".to_string(), "de:it".to_string()]);
    assert_eq!(document.query_selector_all(".quick-link-save").unwrap().length(), 1);
}

#[wasm_bindgen_test]
async fn test_mount_replaces_stale_container() {
    // Left behind by a previous script instance
    let document = document_with_body(
        "<header><nav id=\"host-nav\"></nav><div id=\"items-container\">old</div></header>",
    );
    let view = create_view();

    view.mount(&[]).unwrap();
    settle().await;

    assert_eq!(container_count(&document), 1);
    let container = document.get_element_by_id("items-container").unwrap();
    assert_ne!(container.text_content().as_deref(), Some("old"));
    assert!(chip_labels(&document).is_empty());
}

#[wasm_bindgen_test]
fn test_mount_without_anchor_is_noop() {
    let document = document_with_body("<main></main>");
    let view = create_view();

    let result = view.mount(&[LanguagePair::new("en", "fr")]);

    assert_eq!(result, Err(ControllerError::MissingAnchor));
    assert_eq!(container_count(&document), 0);
}

#[wasm_bindgen_test]
async fn test_chip_click_selects_pair() {
    let document = document_with_body(HOST_PAGE);
    let (view, events) = create_recording_view();
    view.mount(&[LanguagePair::new("en", "fr")]).unwrap();
    settle().await;

    click(&document, ".quick-link-chip");

    assert_eq!(*events.borrow(), vec![PageEvent::Select(LanguagePair::new("en", "fr"))]);
}

#[wasm_bindgen_test]
async fn test_remove_icon_click_only_removes() {
    let document = document_with_body(HOST_PAGE);
    let (view, events) = create_recording_view();
    view.mount(&[LanguagePair::new("en", "fr"), LanguagePair::new("de", "it")]).unwrap();
    settle().await;

    click(&document, ".quick-link-chip .remove-icon");

    assert_eq!(*events.borrow(), vec![PageEvent::Remove(LanguagePair::new("en", "fr"))]);
}

#[wasm_bindgen_test]
async fn test_save_button_click() {
    let document = document_with_body(HOST_PAGE);
    let (view, events) = create_recording_view();
    view.mount(&[]).unwrap();
    settle().await;

    click(&document, ".quick-link-save");

    assert_eq!(*events.borrow(), vec![PageEvent::Save]);
}
