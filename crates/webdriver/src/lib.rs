// buddybot-webdriver: the wire-level half of the automation stack.
//
// Speaks plain HTTP+JSON to a running chromedriver (or any W3C WebDriver
// remote end). Only the handful of endpoints the engine needs are covered;
// this is not a general-purpose WebDriver binding.

pub mod capabilities;
pub mod client;
pub mod error;

pub use capabilities::Capabilities;
pub use client::{Client, ElementRef};
pub use error::{Error, Result};
