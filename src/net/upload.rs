//! Multipart upload helper with fractional progress reporting.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gloo-net` cannot observe upload progress, so this helper drives a raw
//! `XmlHttpRequest` instead. It applies the same security conventions as the
//! pipeline: script-origin marker, bearer header, and the CSRF token as a
//! form field on the way out, normalized `ApiError` on the way back.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

#[cfg(feature = "csr")]
use super::client::{ApiClient, CSRF_FIELD};
#[cfg(feature = "csr")]
use super::error::ApiError;

/// Convert transferred/total byte counts into a 0–100 percentage.
///
/// Unknown totals report 0 so callers render an indeterminate bar rather
/// than a bogus figure.
pub fn progress_percent(loaded: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    ((loaded / total) * 100.0).clamp(0.0, 100.0)
}

/// POST a multipart form to `path`, reporting upload progress (0–100)
/// through `on_progress`. One upload in flight per call.
///
/// # Errors
///
/// `ApiError::Connectivity` when the request never completes, otherwise the
/// normalized HTTP error for non-2xx responses.
#[cfg(feature = "csr")]
pub async fn upload(
    client: &ApiClient,
    path: &str,
    form: web_sys::FormData,
    on_progress: impl Fn(f64) + 'static,
) -> Result<serde_json::Value, ApiError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let url = format!("{}{}", client.base_url(), path);
    if let Some(token) = client.csrf_token() {
        let _ = form.append_with_str(CSRF_FIELD, &token);
    }

    let xhr = web_sys::XmlHttpRequest::new().map_err(|_| ApiError::Connectivity)?;
    xhr.open("POST", &url).map_err(|_| ApiError::Connectivity)?;
    xhr.set_with_credentials(true);
    let _ = xhr.set_request_header("X-Requested-With", "XMLHttpRequest");
    if let Some(token) = client.bearer() {
        let _ = xhr.set_request_header("Authorization", &format!("Bearer {token}"));
    }

    let (done_tx, done_rx) = futures::channel::oneshot::channel::<()>();

    let progress_cb = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(move |event: web_sys::ProgressEvent| {
        if event.length_computable() {
            on_progress(progress_percent(event.loaded(), event.total()));
        }
    });
    if let Ok(upload_target) = xhr.upload() {
        upload_target.set_onprogress(Some(progress_cb.as_ref().unchecked_ref()));
    }

    let mut done_tx = Some(done_tx);
    let loadend_cb = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(move |_event: web_sys::ProgressEvent| {
        if let Some(tx) = done_tx.take() {
            let _ = tx.send(());
        }
    });
    xhr.set_onloadend(Some(loadend_cb.as_ref().unchecked_ref()));

    xhr.send_with_opt_form_data(Some(&form))
        .map_err(|_| ApiError::Connectivity)?;
    done_rx.await.map_err(|_| ApiError::Connectivity)?;

    // Keep the callbacks alive until the request has settled.
    drop(progress_cb);
    drop(loadend_cb);

    let status = xhr.status().map_err(|_| ApiError::Connectivity)?;
    if status == 0 {
        // Network failure: the browser reports status 0 with no response.
        return Err(ApiError::Connectivity);
    }

    let body = xhr
        .response_text()
        .ok()
        .flatten()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or(serde_json::Value::Null);

    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::from_response(status, &body))
    }
}
