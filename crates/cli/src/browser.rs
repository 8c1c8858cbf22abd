//! Adapter implementing the engine's [`Browser`] capability trait on top of
//! the WebDriver client.

use async_trait::async_trait;
use buddybot::browser::{Browser, ElementHandle};
use buddybot::error::{BrowserError, LaunchError};
use wd::{Capabilities, Client, ElementRef};

pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    pub async fn launch(endpoint: &str, headless: bool) -> Result<Self, LaunchError> {
        let caps = Capabilities::chrome().headless(headless);
        let client = Client::new_session(endpoint, &caps)
            .await
            .map_err(|err| LaunchError::new(err.to_string()))?;
        Ok(Self { client })
    }
}

fn element(handle: &ElementHandle) -> ElementRef {
    ElementRef::new(handle.0.clone())
}

fn driver_error(err: wd::Error) -> BrowserError {
    BrowserError::Driver(err.to_string())
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.client
            .goto(url)
            .await
            .map_err(|err| BrowserError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            })
    }

    async fn find(&self, selector: &str) -> Result<ElementHandle, BrowserError> {
        match self.client.find_element(selector).await {
            Ok(el) => Ok(ElementHandle(el.id().to_string())),
            Err(wd::Error::NoSuchElement { selector }) => {
                Err(BrowserError::NotFound { selector })
            }
            Err(err) => Err(driver_error(err)),
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ElementHandle>, BrowserError> {
        let elements = self
            .client
            .find_elements(selector)
            .await
            .map_err(driver_error)?;
        Ok(elements
            .into_iter()
            .map(|el| ElementHandle(el.id().to_string()))
            .collect())
    }

    async fn click(&self, handle: &ElementHandle) -> Result<(), BrowserError> {
        self.client.click(&element(handle)).await.map_err(driver_error)
    }

    async fn clear(&self, handle: &ElementHandle) -> Result<(), BrowserError> {
        self.client.clear(&element(handle)).await.map_err(driver_error)
    }

    async fn type_text(&self, handle: &ElementHandle, text: &str) -> Result<(), BrowserError> {
        self.client
            .send_keys(&element(handle), text)
            .await
            .map_err(driver_error)
    }

    async fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        self.client
            .attribute(&element(handle), name)
            .await
            .map_err(driver_error)
    }

    async fn is_interactable(&self, handle: &ElementHandle) -> Result<bool, BrowserError> {
        let el = element(handle);
        let displayed = match self.client.is_displayed(&el).await {
            Ok(displayed) => displayed,
            // A handle that went stale mid-poll reads as "not interactable",
            // the same way a vanished element does.
            Err(err) if err.is_element_missing() => return Ok(false),
            Err(err) => return Err(driver_error(err)),
        };
        if !displayed {
            return Ok(false);
        }
        match self.client.is_enabled(&el).await {
            Ok(enabled) => Ok(enabled),
            Err(err) if err.is_element_missing() => Ok(false),
            Err(err) => Err(driver_error(err)),
        }
    }

    async fn execute(&self, script: &str) -> Result<(), BrowserError> {
        self.client.execute(script).await.map_err(driver_error)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.client.quit().await.map_err(driver_error)
    }
}
