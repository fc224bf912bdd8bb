//! Text downloads through the browser's `fetch`.

use anyhow::Context;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// GET `url` (relative to the page) and return the body as text.
///
/// Network failures and non-2xx responses are errors.
pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Accept", "application/json, application/geo+json")
        .map_err(js_error)?;

    let window = web_sys::window().context("no browser window")?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)
        .with_context(|| format!("GET {} failed", url))?
        .dyn_into()
        .map_err(js_error)?;

    if !response.ok() {
        anyhow::bail!("GET {} returned HTTP {}", url, response.status());
    }

    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let text = body.as_string().context("response body is not text")?;
    log::debug!("GET {}: {} bytes", url, text.len());
    Ok(text)
}

fn js_error(value: JsValue) -> anyhow::Error {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return anyhow::anyhow!(String::from(err.message()));
    }
    anyhow::anyhow!(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
