//! The DOM contract between the page markup and the controllers.

// --- Element ids ---
pub const NAVBAR_ID: &str = "navbar";
pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const NAV_MENU_ID: &str = "navMenu";
pub const SCROLL_TOP_ID: &str = "scrollTop";
pub const CONTACT_FORM_ID: &str = "contactForm";
/// Element whose text is an optional JSON [`SiteConfig`](crate::config::SiteConfig) override.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

// --- Selectors ---
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const FORM_MESSAGE_SELECTOR: &str = ".form-message";
pub const LAZY_IMAGE_SELECTOR: &str = r#"img[loading="lazy"]"#;
pub const REVEAL_SELECTORS: [&str; 4] =
    [".reveal-fade", ".reveal-left", ".reveal-right", ".reveal-scale"];

// --- Classes ---
pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const VISIBLE_CLASS: &str = "visible";
pub const FORM_MESSAGE_CLASS: &str = "form-message";

// --- Attributes ---
pub const DEFERRED_SOURCE_ATTRIBUTE: &str = "data-src";
pub const SOURCE_ATTRIBUTE: &str = "src";
pub const HREF_ATTRIBUTE: &str = "href";

// --- Contact form fields ---
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_MESSAGE: &str = "message";
pub const REQUIRED_FIELDS: [&str; 3] = [FIELD_NAME, FIELD_EMAIL, FIELD_MESSAGE];

// --- Module names ---
pub const NAVIGATION: &str = "navigation";
pub const REVEAL: &str = "reveal";
pub const SCROLL_TOP: &str = "scroll-top";
pub const CONTACT: &str = "contact";
pub const LAZY_IMAGES: &str = "lazy-images";
pub const PERFORMANCE: &str = "performance";
