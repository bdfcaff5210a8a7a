/// Content script wiring for the translation page

use crate::analytics::RuntimeReporter;
use crate::chrome::{self, ChromeStorage, StorageArea};
use crate::config::ContentConfig;
use crate::controller::{PageEvent, SyncController};
use crate::ui::{dom, DomView};
use futures::channel::mpsc;
use futures::StreamExt;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

/// Build the controller and feed it page events for the lifetime of the page.
///
/// Clicks, document readiness and same-document navigations all go through
/// one queue, drained by a single task.
pub fn start(config: ContentConfig) {
    let (sender, mut receiver) = mpsc::unbounded::<PageEvent>();

    let dispatch = Callback::from(move |event: PageEvent| {
        if sender.unbounded_send(event).is_err() {
            log::warn!("Page event queue closed");
        }
    });

    let controller = SyncController::new(
        ChromeStorage::new(StorageArea::Sync),
        DomView::new(config.clone(), dispatch.clone()),
        RuntimeReporter,
        config,
    );

    spawn_local(async move {
        while let Some(event) = receiver.next().await {
            controller.handle(event).await;
        }
    });

    {
        let dispatch = dispatch.clone();
        dom::on_document_ready(move || dispatch.emit(PageEvent::Ready));
    }
    chrome::watch_navigation(move || dispatch.emit(PageEvent::Navigated));
}
