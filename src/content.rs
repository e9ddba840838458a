/// Content script runtime: answers pull requests from the popup and pushes
/// freshly extracted comments after page load.
use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, MutationObserver, MutationObserverInit, MutationRecord};

use crate::extract::{scan, selectors};
use crate::messaging::{CommentsResponse, Message};

/// Wait before answering a pull request, so late-loading comments land first.
const PULL_SCAN_DELAY_MS: u32 = 1_500;
/// Wait after page load before the unsolicited auto-extraction.
const AUTO_EXTRACT_DELAY_MS: u32 = 3_000;

// Bridge to chrome.runtime, which is only reachable from JS.
#[wasm_bindgen(module = "/js/content_bridge.js")]
extern "C" {
    /// Registers `callback(request, sendResponse)` on chrome.runtime.onMessage
    /// and keeps the channel open for an asynchronous response.
    fn registerMessageListener(callback: &Function);

    #[wasm_bindgen(catch)]
    fn sendRuntimeMessage(message: JsValue) -> Result<(), JsValue>;
}

/// Wire up the content script: message listener, auto-extraction, observer.
pub fn start() {
    register_pull_listener();
    schedule_auto_extract();
    observe_comment_section();
    log::info!("content script loaded and ready");
}

fn page_document() -> Option<Document> {
    web_sys::window().and_then(|win| win.document())
}

fn page_url() -> String {
    web_sys::window()
        .and_then(|win| win.location().href().ok())
        .unwrap_or_default()
}

fn page_title() -> String {
    page_document().map(|doc| doc.title()).unwrap_or_default()
}

fn register_pull_listener() {
    let callback = Closure::wrap(Box::new(|request: JsValue, send_response: Function| {
        let message: Message = match serde_wasm_bindgen::from_value(request) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("unrecognized runtime message: {:?}", e);
                return;
            }
        };

        if message != Message::GetComments {
            return;
        }
        log::info!("message received: getComments");

        // The response is delayed so dynamically loaded comments make it
        // into the scan; the bridge keeps the channel open meanwhile.
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(PULL_SCAN_DELAY_MS).await;

            let comments = page_document()
                .map(|doc| scan(&doc))
                .unwrap_or_default();

            let response = CommentsResponse {
                success: true,
                comments,
                video_url: page_url(),
                video_title: page_title(),
            };

            match serde_wasm_bindgen::to_value(&response) {
                Ok(value) => {
                    if let Err(e) = send_response.call1(&JsValue::NULL, &value) {
                        log::warn!("failed to deliver response: {:?}", e);
                    }
                }
                Err(e) => log::error!("failed to serialize response: {:?}", e),
            }
        });
    }) as Box<dyn Fn(JsValue, Function)>);

    registerMessageListener(callback.as_ref().unchecked_ref());
    callback.forget();
}

/// Push extraction for the case where the popup was already open before the
/// page finished loading its comments.
fn schedule_auto_extract() {
    let run = || {
        spawn_local(async {
            gloo_timers::future::TimeoutFuture::new(AUTO_EXTRACT_DELAY_MS).await;

            let comments = page_document()
                .map(|doc| scan(&doc))
                .unwrap_or_default();
            log::info!("auto-extraction: {} comments", comments.len());

            if comments.is_empty() {
                return;
            }

            let message = Message::CommentsExtracted {
                comments,
                video_url: page_url(),
                video_title: page_title(),
            };

            match serde_wasm_bindgen::to_value(&message) {
                Ok(value) => {
                    if let Err(e) = sendRuntimeMessage(value) {
                        // Normal when no listener is around to receive it.
                        log::info!("push not delivered: {:?}", e);
                    }
                }
                Err(e) => log::error!("failed to serialize push message: {:?}", e),
            }
        });
    };

    let already_loaded = page_document()
        .map(|doc| doc.ready_state() == "complete")
        .unwrap_or(false);

    if already_loaded {
        run();
        return;
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let on_load = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::info!("page loaded, waiting for comments");
        run();
    }) as Box<dyn Fn(web_sys::Event)>);

    if window
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("failed to attach load listener");
    }
    on_load.forget();
}

/// Watch the comments section for dynamically added comments.
///
/// Detection only logs for now; no automatic re-scan or re-push happens.
fn observe_comment_section() {
    let Some(document) = page_document() else {
        return;
    };
    let Some(section) = document
        .query_selector(selectors::COMMENTS_SECTION)
        .ok()
        .flatten()
    else {
        return;
    };

    let callback = Closure::wrap(Box::new(|mutations: js_sys::Array, _: MutationObserver| {
        let has_new_comments = mutations.iter().any(|entry| {
            let Ok(record) = entry.dyn_into::<MutationRecord>() else {
                return false;
            };
            let added = record.added_nodes();
            (0..added.length()).filter_map(|i| added.item(i)).any(|node| {
                node.dyn_into::<web_sys::Element>()
                    .ok()
                    .and_then(|el| el.matches(selectors::COMMENT_CONTAINER).ok())
                    .unwrap_or(false)
            })
        });

        if has_new_comments {
            log::info!("new comments detected");
        }
    }) as Box<dyn Fn(js_sys::Array, MutationObserver)>);

    match MutationObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => {
            let options = MutationObserverInit::new();
            options.set_child_list(true);
            options.set_subtree(true);
            if observer.observe_with_options(&section, &options).is_err() {
                log::warn!("failed to observe comments section");
            }
            callback.forget();
        }
        Err(e) => log::warn!("failed to create mutation observer: {:?}", e),
    }
}
