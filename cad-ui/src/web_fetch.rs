//! Browser implementations of the fetch and image-handle seams.
//!
//! `WebTransport` issues GETs through `window.fetch`; `BlobUrls` wraps image
//! bytes in a `Blob` and hands out `blob:` URLs that `<img>` can display
//! until they are revoked.

use cad_core::error::FetchError;
use cad_core::image::ObjectUrls;
use cad_core::transport::{RawResponse, Transport, ACCEPT};
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Headers, Request, RequestInit, Response, Url};

/// Message text of a JS exception, or its string form.
fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_default()
}

fn transport_error(value: JsValue) -> FetchError {
    FetchError::transport(js_message(&value))
}

/// Milliseconds since the epoch as a `Duration`, for the debouncer clock.
pub fn now() -> Duration {
    Duration::from_millis(js_sys::Date::now() as u64)
}

/// [`Transport`] over the browser's `fetch`.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct WebTransport;

impl Transport for WebTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let window = web_sys::window().ok_or_else(|| FetchError::transport("no global window"))?;

        let headers = Headers::new().map_err(transport_error)?;
        headers.set("accept", ACCEPT).map_err(transport_error)?;
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &init).map_err(transport_error)?;
        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport_error)?;
        let response: Response = value.dyn_into().map_err(transport_error)?;

        let status = response.status();
        let content_type = response.headers().get("content-type").ok().flatten();
        log::info!("[CAD] {} -> {}", url, status);

        if !response.ok() {
            return Ok(RawResponse {
                status,
                content_type,
                body: Vec::new(),
            });
        }

        let buffer = JsFuture::from(response.array_buffer().map_err(transport_error)?)
            .await
            .map_err(|e| FetchError::decode(js_message(&e)))?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// [`ObjectUrls`] backed by `URL.createObjectURL` / `URL.revokeObjectURL`.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct BlobUrls;

impl ObjectUrls for BlobUrls {
    fn create(&self, bytes: &[u8], content_type: Option<&str>) -> Result<String, FetchError> {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));

        let options = BlobPropertyBag::new();
        if let Some(ct) = content_type {
            options.set_type(ct);
        }

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| FetchError::ObjectUrl(js_message(&e)))?;
        Url::create_object_url_with_blob(&blob).map_err(|e| FetchError::ObjectUrl(js_message(&e)))
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("[CAD] failed to revoke {}: {}", url, js_message(&e));
        }
    }
}
