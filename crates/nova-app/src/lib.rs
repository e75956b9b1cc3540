//! Nova App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters and sync components and hands them
//! to the egui UI.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use nova_platform::storage::auto_detect_storage;
use nova_types::{NovaError, Result, config::StorageConfig};

const CANVAS_ID: &str = "nova_canvas";

/// WASM entry point, called from index.html
#[wasm_bindgen(start)]
pub async fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Nova client starting...");

    let canvas = match find_canvas(CANVAS_ID) {
        Ok(canvas) => canvas,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return;
        }
    };

    // The saved config may itself name a different backend; the app
    // re-selects storage once it is read.
    let boot_storage = auto_detect_storage(&StorageConfig::default());
    let config = app::load_config(boot_storage.as_ref()).await;

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(app::NovaApp::new(cc, config, boot_storage)))),
            )
            .await;
        if let Err(e) = started {
            log::error!("Failed to start eframe: {:?}", e);
        }
    });
}

fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| NovaError::JsInterop("No document".to_string()))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| NovaError::JsInterop(format!("No canvas element with id '{}'", id)))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| NovaError::JsInterop(format!("Element '{}' is not a canvas", id)))
}
