use crate::constants::REVEAL_SELECTORS;
use crate::modules::ModuleSet;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

/// Top-level site configuration shared by every controller.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfigInner {
    pub modules: ModuleSet,
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub scroll_top: ScrollTopConfig,
    pub contact: ContactConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into controllers.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(flatten, default)]
    inner: Arc<SiteConfigInner>,
}

impl Deref for SiteConfig {
    type Target = SiteConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SiteConfig {
    fn deref_mut(&mut self) -> &mut SiteConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Navigation bar behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// The bar counts as scrolled once the page is scrolled strictly past this offset.
    pub scrolled_offset: f64,
    pub throttle_ms: u64,
}

/// Scroll-triggered reveal animations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selectors: Vec<String>,
    pub threshold: f64,
    pub root_margin: String,
}

/// Scroll-to-top button.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrollTopConfig {
    /// The button is shown once the page is scrolled strictly past this offset.
    pub visible_offset: f64,
    pub throttle_ms: u64,
}

/// Contact form feedback.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Time a message stays fully visible before fading.
    pub message_lifetime_ms: u64,
    /// Fade-out duration before the message is removed.
    pub fade_ms: u64,
    pub success_text: String,
    pub missing_fields_text: String,
    pub invalid_email_text: String,
}

/// Load-time performance logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Host names on which the reporter is active.
    pub development_hosts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
}

impl NavigationConfig {
    #[must_use]
    pub const fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl ScrollTopConfig {
    #[must_use]
    pub const fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl ContactConfig {
    #[must_use]
    pub const fn message_lifetime(&self) -> Duration {
        Duration::from_millis(self.message_lifetime_ms)
    }

    #[must_use]
    pub const fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl PerformanceConfig {
    #[must_use]
    pub fn is_development_host(&self, hostname: &str) -> bool {
        self.development_hosts.iter().any(|host| host == hostname)
    }
}

// --- Default ---

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { scrolled_offset: 50.0, throttle_ms: 100 }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: REVEAL_SELECTORS.iter().map(|s| (*s).to_owned()).collect(),
            threshold: 0.15,
            root_margin: "0px".to_owned(),
        }
    }
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self { visible_offset: 500.0, throttle_ms: 100 }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            message_lifetime_ms: 5000,
            fade_ms: 300,
            success_text: "Thank you for your message! I will get back to you soon.".to_owned(),
            missing_fields_text: "Please fill in all fields.".to_owned(),
            invalid_email_text: "Please enter a valid email address.".to_owned(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { development_hosts: vec!["localhost".to_owned(), "127.0.0.1".to_owned()] }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None }
    }
}
