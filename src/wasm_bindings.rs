//! WASM bindings for lzw-stream.
//!
//! Provides a browser-compatible API for `.Z` detection and decoding.

// Generated glue exports `no_mangle` symbols.
#![allow(unsafe_code)]

use wasm_bindgen::prelude::*;

use crate::decompress::{DecodeOptions, LzwDecoder};
use crate::formats::Signature;
use crate::parsing::HeaderParser;

/// Check if a buffer starts with the `.Z` magic bytes.
#[wasm_bindgen]
pub fn is_z_file(data: &[u8]) -> bool {
    Signature::from_bytes(data) == Some(Signature::Compress)
}

/// Decompress a whole `.Z` buffer.
///
/// `max_output` caps the decompressed size; pass 0 for no cap.
#[wasm_bindgen]
pub fn decompress_z(data: &[u8], max_output: u64) -> Result<Vec<u8>, JsError> {
    let options = DecodeOptions {
        max_output: (max_output > 0).then_some(max_output),
        ..DecodeOptions::default()
    };
    crate::decompress_with(data, options).map_err(|e| JsError::new(&e.to_string()))
}

/// Parse the `.Z` header.
///
/// Returns `{ maxBits, blockMode }`.
#[wasm_bindgen]
pub fn parse_z_header(data: &[u8]) -> Result<JsValue, JsError> {
    let header = HeaderParser::parse(data).map_err(|e| JsError::new(&e.to_string()))?;

    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &obj,
        &"maxBits".into(),
        &JsValue::from_f64(header.max_bits as f64),
    );
    let _ = js_sys::Reflect::set(
        &obj,
        &"blockMode".into(),
        &JsValue::from_bool(header.block_mode),
    );

    Ok(obj.into())
}

/// WASM-compatible decoder that reports progress between calls.
#[wasm_bindgen]
pub struct WasmLzwDecoder {
    decoder: LzwDecoder<std::io::Cursor<Vec<u8>>>,
}

#[wasm_bindgen]
impl WasmLzwDecoder {
    /// Create a decoder over a complete `.Z` buffer.
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<WasmLzwDecoder, JsError> {
        let decoder = LzwDecoder::new(std::io::Cursor::new(data), DecodeOptions::default())
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { decoder })
    }

    /// Decode until at least `min_bytes` of output are ready or the stream ends.
    #[wasm_bindgen]
    pub fn decode_chunk(&mut self, min_bytes: usize) -> Result<Vec<u8>, JsError> {
        let mut out = Vec::with_capacity(min_bytes);
        while out.len() < min_bytes {
            let more = self
                .decoder
                .step(&mut out)
                .map_err(|e| JsError::new(&e.to_string()))?;
            if !more {
                break;
            }
        }
        Ok(out)
    }

    /// Get total bytes decompressed so far.
    #[wasm_bindgen]
    pub fn bytes_written(&self) -> u64 {
        self.decoder.summary().bytes_out
    }

    /// Check if the stream has been fully decoded.
    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.decoder.state() == crate::decompress::DecoderState::Done
    }

    /// Whether the stream ended inside its final code.
    #[wasm_bindgen]
    pub fn is_truncated(&self) -> bool {
        self.decoder.summary().truncated
    }
}
