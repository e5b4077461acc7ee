use std::borrow::Cow;
use tracing::{debug, warn};
use vitae_domain::config::SiteConfig;
use vitae_domain::constants::CONFIG_ELEMENT_ID;
use vitae_platform::Platform;

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

/// Loads the site configuration embedded in the page.
///
/// The configuration is layered:
/// 1. **Defaults**: every field of [`SiteConfig`] has a compiled default.
/// 2. **Page override**: the text of the element with id `site-config` (usually a
///    `<script type="application/json">`) is parsed as JSON and overlays the defaults.
///    Keys that are absent keep their default.
///
/// # Errors
/// Returns [`ConfigError::Parse`] if the element exists but its text is not a valid document.
///
/// # Example
/// ```rust
/// use vitae_kernel::config::load_config;
/// use vitae_platform::memory::MemoryPlatform;
/// use vitae_platform::Platform;
///
/// let dom = MemoryPlatform::new();
/// let script = dom.append(dom.body_node(), "script", &[("id", "site-config")]);
/// dom.set_text_content(script, r#"{ "scroll_top": { "visible_offset": 800 } }"#).unwrap();
///
/// let cfg = load_config(&*dom).unwrap();
/// assert!((cfg.scroll_top.visible_offset - 800.0).abs() < f64::EPSILON);
/// ```
pub fn load_config(platform: &dyn Platform) -> Result<SiteConfig, ConfigError> {
    let Some(raw) = platform
        .element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|node| platform.text_content(node))
        .filter(|text| !text.trim().is_empty())
    else {
        debug!("No page configuration, using defaults");
        return Ok(SiteConfig::default());
    };

    debug!(bytes = raw.len(), "Loading page configuration");

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        source,
        context: Some(format!("#{CONFIG_ELEMENT_ID}").into()),
    })
}

/// Like [`load_config`], but a malformed document only logs a warning and yields the defaults.
#[must_use]
pub fn load_config_or_default(platform: &dyn Platform) -> SiteConfig {
    load_config(platform).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring malformed page configuration");
        SiteConfig::default()
    })
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
