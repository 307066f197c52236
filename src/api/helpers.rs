//! Shared helpers for WASM API operations
//!
//! Console logging, serde conversion to and from `JsValue`, and access to
//! the process-wide document and configuration.

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::error::SetlistError;
use crate::models::Document;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
///
/// Maps (including flattened structs such as notes) become plain objects.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Turn a core error into a JS error string, logging it on the way out
///
/// Locked and not-found errors are ordinary user-facing rejections and log
/// as warnings; everything else logs as an error.
pub fn to_js_error(operation: &str, err: SetlistError) -> JsValue {
    let msg = format!("{}: {}", operation, err);
    match err {
        SetlistError::LockedArrangement { .. } | SetlistError::NotFound { .. } => wasm_warn!("{}", msg),
        _ => wasm_error!("{}", msg),
    }
    JsValue::from_str(&msg)
}

// ============================================================================
// Document Storage
// ============================================================================

// WASM-owned document storage (canonical source of truth)
lazy_static! {
    static ref DOCUMENT: Mutex<Option<Document>> = Mutex::new(None);
    static ref CONFIG: Mutex<EngineConfig> = Mutex::new(EngineConfig::default());
}

fn poisoned(what: &str) -> JsValue {
    let msg = format!("{} lock poisoned", what);
    wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}

pub fn document_slot() -> Result<MutexGuard<'static, Option<Document>>, JsValue> {
    DOCUMENT.lock().map_err(|_| poisoned("Document"))
}

pub fn config() -> Result<EngineConfig, JsValue> {
    CONFIG.lock().map(|c| c.clone()).map_err(|_| poisoned("Config"))
}

pub fn set_config(config: EngineConfig) -> Result<(), JsValue> {
    *CONFIG.lock().map_err(|_| poisoned("Config"))? = config;
    Ok(())
}

/// Run an operation against the loaded document
///
/// The document methods are all-or-nothing, so an error here means the
/// stored document is unchanged.
pub fn with_document<T, F>(operation: &str, f: F) -> Result<T, JsValue>
where
    F: FnOnce(&mut Document, &EngineConfig) -> crate::error::Result<T>,
{
    let config = config()?;
    let mut slot = document_slot()?;
    let doc = slot.as_mut().ok_or_else(|| {
        wasm_warn!("{}: no document loaded", operation);
        JsValue::from_str("No document loaded")
    })?;
    f(doc, &config).map_err(|e| to_js_error(operation, e))
}
