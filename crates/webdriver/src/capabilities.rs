//! New-session capability payload for Chrome-family drivers.

use serde_json::{Value, json};

/// Chrome launch options, including the fingerprint-suppression switches
/// the automation target otherwise uses to detect WebDriver sessions.
#[derive(Debug, Clone)]
pub struct Capabilities {
    headless: bool,
    args: Vec<String>,
}

impl Capabilities {
    pub fn chrome() -> Self {
        Self {
            headless: false,
            args: vec!["--disable-blink-features=AutomationControlled".to_string()],
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Full `POST /session` request body.
    pub fn to_json(&self) -> Value {
        let mut args = self.args.clone();
        if self.headless {
            args.push("--headless=new".to_string());
            args.push("--no-sandbox".to_string());
            args.push("--disable-dev-shm-usage".to_string());
            args.push("--disable-gpu".to_string());
        }
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": args,
                        "excludeSwitches": ["enable-automation"],
                        "useAutomationExtension": false,
                    }
                }
            }
        })
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::chrome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_payload_carries_fingerprint_switches() {
        let body = Capabilities::chrome().to_json();
        let opts = &body["capabilities"]["alwaysMatch"]["goog:chromeOptions"];
        assert_eq!(opts["excludeSwitches"][0], "enable-automation");
        assert_eq!(opts["useAutomationExtension"], false);
        assert_eq!(opts["args"][0], "--disable-blink-features=AutomationControlled");
    }

    #[test]
    fn headless_adds_switches() {
        let body = Capabilities::chrome().headless(true).to_json();
        let args = body["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap()
            .clone();
        assert!(args.iter().any(|a| a == "--headless=new"));
        assert!(args.iter().any(|a| a == "--no-sandbox"));
    }

    #[test]
    fn headless_off_by_default() {
        let body = Capabilities::chrome().to_json();
        let args = body["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap()
            .clone();
        assert!(!args.iter().any(|a| a == "--headless=new"));
    }
}
