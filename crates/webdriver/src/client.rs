//! Session-scoped WebDriver client.
//!
//! One `Client` is one browser session on the remote end. All methods map
//! 1:1 onto W3C WebDriver endpoints; responses are unwrapped from the
//! `{"value": ...}` envelope and W3C error payloads become [`Error`] values.

use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, trace};
use url::Url;

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};

/// W3C element identifier key inside element reference objects.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Script run right after session creation so the page cannot see
/// `navigator.webdriver === true`. Matches the switches set in
/// [`Capabilities`]; together they are the whole extent of fingerprint
/// suppression this client performs.
const WEBDRIVER_SUPPRESSION_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// Opaque reference to an element held by the remote end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

pub struct Client {
    http: reqwest::Client,
    base: String,
    session_id: String,
}

impl Client {
    /// Creates a session against `endpoint` (e.g. `http://localhost:9515`)
    /// and runs the webdriver-flag suppression script in the fresh page.
    pub async fn new_session(endpoint: &str, caps: &Capabilities) -> Result<Self> {
        let base = Url::parse(endpoint)
            .map_err(|err| Error::SessionCreate(format!("invalid endpoint {endpoint}: {err}")))?
            .to_string();
        let base = base.trim_end_matches('/').to_string();

        let http = reqwest::Client::new();
        let response = http
            .post(format!("{base}/session"))
            .json(&caps.to_json())
            .send()
            .await
            .map_err(|err| Error::SessionCreate(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| Error::SessionCreate(err.to_string()))?;
        let value = decode(status, &body).map_err(|err| match err {
            Error::Wire { code, message } => {
                Error::SessionCreate(format!("{code}: {message}"))
            }
            other => other,
        })?;

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Malformed("new session response without sessionId".into()))?
            .to_string();
        debug!(target = "wd", %session_id, "webdriver session created");

        let client = Self { http, base, session_id };
        client.execute(WEBDRIVER_SUPPRESSION_SCRIPT).await?;
        Ok(client)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(target = "wd", %url, "navigate");
        self.post("url", json!({ "url": url })).await?;
        Ok(())
    }

    pub async fn find_element(&self, selector: &str) -> Result<ElementRef> {
        let value = self
            .post("element", locator(selector))
            .await
            .map_err(|err| narrow_missing(err, selector))?;
        element_from_value(&value)
    }

    pub async fn find_elements(&self, selector: &str) -> Result<Vec<ElementRef>> {
        let value = self.post("elements", locator(selector)).await?;
        let items = value
            .as_array()
            .ok_or_else(|| Error::Malformed("elements response is not an array".into()))?;
        items.iter().map(element_from_value).collect()
    }

    pub async fn click(&self, element: &ElementRef) -> Result<()> {
        self.post(&format!("element/{}/click", element.id()), json!({})).await?;
        Ok(())
    }

    pub async fn clear(&self, element: &ElementRef) -> Result<()> {
        self.post(&format!("element/{}/clear", element.id()), json!({})).await?;
        Ok(())
    }

    pub async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.post(&format!("element/{}/value", element.id()), json!({ "text": text }))
            .await?;
        Ok(())
    }

    pub async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
        let value = self
            .get(&format!("element/{}/attribute/{name}", element.id()))
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    pub async fn is_displayed(&self, element: &ElementRef) -> Result<bool> {
        let value = self.get(&format!("element/{}/displayed", element.id())).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    pub async fn is_enabled(&self, element: &ElementRef) -> Result<bool> {
        let value = self.get(&format!("element/{}/enabled", element.id())).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Synchronous script execution with no arguments; the return value is
    /// surfaced as raw JSON.
    pub async fn execute(&self, script: &str) -> Result<Value> {
        trace!(target = "wd", %script, "execute script");
        self.post("execute/sync", json!({ "script": script, "args": [] }))
            .await
    }

    /// Ends the session on the remote end. The client is unusable afterwards.
    pub async fn quit(&self) -> Result<()> {
        debug!(target = "wd", session_id = %self.session_id, "deleting session");
        let response = self
            .http
            .delete(format!("{}/session/{}", self.base, self.session_id))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        decode(status, &body)?;
        Ok(())
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let response = self
            .http
            .post(self.session_url(path))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        decode(status, &text)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let response = self.http.get(self.session_url(path)).send().await?;
        let status = response.status();
        let text = response.text().await?;
        decode(status, &text)
    }

    fn session_url(&self, path: &str) -> String {
        format!("{}/session/{}/{path}", self.base, self.session_id)
    }
}

fn locator(selector: &str) -> Value {
    json!({ "using": "css selector", "value": selector })
}

/// Rewrites a generic "no such element" wire error to the variant carrying
/// the selector that missed.
fn narrow_missing(err: Error, selector: &str) -> Error {
    match err {
        Error::Wire { ref code, .. } if code == "no such element" => Error::NoSuchElement {
            selector: selector.to_string(),
        },
        other => other,
    }
}

fn element_from_value(value: &Value) -> Result<ElementRef> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(ElementRef::new)
        .ok_or_else(|| Error::Malformed("element reference without W3C element key".into()))
}

/// Unwraps the `{"value": ...}` envelope, turning W3C error payloads into
/// typed errors.
fn decode(status: StatusCode, body: &str) -> Result<Value> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|_| Error::Malformed(format!("non-JSON response ({status})")))?;
    let value = parsed.get("value").cloned().unwrap_or(Value::Null);

    if let Some(code) = value.get("error").and_then(Value::as_str) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(Error::from_wire(code.to_string(), message));
    }
    if !status.is_success() {
        return Err(Error::Malformed(format!("unexpected status {status}")));
    }
    Ok(value)
}
