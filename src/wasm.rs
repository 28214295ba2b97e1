//! Browser bindings for the tripcode module.
//!
//! Mirrors the [`HashModule`] entry points under camelCase names. Digests
//! cross the boundary as a `Uint32Array` of the four digest words.

use wasm_bindgen::prelude::*;

use crate::module::{DeviceInfo, HashModule, TripcodeModule};
use crate::tripcode::Digest;

fn to_js_error(err: serde_wasm_bindgen::Error) -> JsError {
    JsError::new(&err.to_string())
}

/// Decode a tripcode line into its four digest words.
#[wasm_bindgen(js_name = decodeTripcode)]
pub fn decode_tripcode(line: &str) -> Result<Vec<u32>, JsError> {
    let digest = TripcodeModule.decode(line)?;
    Ok(digest.words().to_vec())
}

/// Encode digest words (only the first two are read) as `!XXXXXXXXXX`.
#[wasm_bindgen(js_name = encodeTripcode)]
pub fn encode_tripcode(words: &[u32]) -> Result<String, JsError> {
    let [w0, w1, ..] = words else {
        return Err(JsError::new("tripcode digest needs at least two words"));
    };
    Ok(TripcodeModule.encode(&Digest::new(*w0, *w1)).into_string())
}

#[wasm_bindgen(js_name = normalizePlaintext)]
pub fn normalize_plaintext(plain: &[u8]) -> Vec<u8> {
    TripcodeModule.normalize_plaintext(plain)
}

/// `{ plaintext, hash }`
#[wasm_bindgen(js_name = selfTest)]
pub fn self_test() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&TripcodeModule.self_test()).map_err(to_js_error)
}

#[wasm_bindgen(js_name = maxPlaintextLength)]
pub fn max_plaintext_length() -> usize {
    TripcodeModule.max_plaintext_length()
}

/// `{ min, max }`
#[wasm_bindgen(js_name = saltBounds)]
pub fn salt_bounds() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&TripcodeModule.salt_bounds()).map_err(to_js_error)
}

#[wasm_bindgen(js_name = moduleInfo)]
pub fn module_info() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&TripcodeModule.info()).map_err(to_js_error)
}

/// Takes snake_case names, e.g. `unstableWarning("apple", "cpu")`.
#[wasm_bindgen(js_name = unstableWarning)]
pub fn unstable_warning(vendor: &str, device_type: &str) -> Result<bool, JsError> {
    let device = DeviceInfo {
        platform_vendor: vendor.parse()?,
        device_type: device_type.parse()?,
    };
    Ok(TripcodeModule.unstable_warning(&device))
}
