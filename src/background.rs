/// Background service worker: delivers `track_event` messages to the collector
///
/// The worker registers its `onMessage` listener synchronously in
/// `extension/background.js` (MV3 drops messages that wake a worker with no
/// listener) and hands each message to [`handle_message`] once the module is
/// initialised.

use crate::analytics::{Analytics, HttpTransport, RuntimeMessage};
use crate::chrome::{ChromeStorage, StorageArea};
use crate::config::AnalyticsConfig;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

type WorkerAnalytics = Analytics<ChromeStorage, ChromeStorage, HttpTransport>;

thread_local! {
    static ANALYTICS: Rc<WorkerAnalytics> = Rc::new(Analytics::new(
        AnalyticsConfig::default(),
        ChromeStorage::new(StorageArea::Local),
        ChromeStorage::new(StorageArea::Session),
        HttpTransport::new(),
    ));
}

/// `(category, label)` for a well-formed `track_event` message, `None` for anything else
pub fn parse_message(message: JsValue) -> Option<(String, Option<String>)> {
    serde_wasm_bindgen::from_value::<RuntimeMessage>(message)
        .ok()?
        .into_track_event()
}

pub fn handle_message(message: JsValue) {
    let Some((category, label)) = parse_message(message) else {
        return;
    };

    let analytics = ANALYTICS.with(Rc::clone);
    spawn_local(async move {
        if let Err(e) = analytics
            .fire_event(&category, label.as_deref(), js_sys::Date::now())
            .await
        {
            log::error!("[Analytics] Failed to send event {}: {}", category, e);
        }
    });
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_message(json: &str) -> JsValue {
        js_sys::JSON::parse(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_parse_track_event_from_plain_object() {
        let message = js_message(r#"{"action":"track_event","category":"quick_link","label":"save:en:fr"}"#);

        assert_eq!(
            parse_message(message),
            Some(("quick_link".to_string(), Some("save:en:fr".to_string())))
        );
    }

    #[wasm_bindgen_test]
    fn test_parse_ignores_other_messages() {
        assert_eq!(parse_message(js_message(r#"{"action":"ping"}"#)), None);
        assert_eq!(parse_message(js_message(r#""track_event""#)), None);
        assert_eq!(parse_message(JsValue::UNDEFINED), None);
    }
}
