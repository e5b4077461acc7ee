use std::time::Duration;
use strum_macros::AsRefStr;
use tracing::{trace, warn};
use vitae_domain::constants::{FORM_MESSAGE_CLASS, FORM_MESSAGE_SELECTOR};
use vitae_platform::{NodeRef, Platform, PlatformError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

const BASE_STYLE: [(&str, &str); 4] = [
    ("padding", "1rem"),
    ("margin-bottom", "1rem"),
    ("border-radius", "0.5rem"),
    ("font-weight", "500"),
];

impl MessageKind {
    /// Inline palette: background, text colour and border.
    const fn palette(self) -> [(&'static str, &'static str); 3] {
        match self {
            Self::Success => [
                ("background", "rgba(16, 185, 129, 0.1)"),
                ("color", "#10b981"),
                ("border", "1px solid rgba(16, 185, 129, 0.3)"),
            ],
            Self::Error => [
                ("background", "rgba(239, 68, 68, 0.1)"),
                ("color", "#ef4444"),
                ("border", "1px solid rgba(239, 68, 68, 0.3)"),
            ],
        }
    }
}

/// Lifetime of a feedback message.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lifetime {
    pub(crate) visible: Duration,
    pub(crate) fade: Duration,
}

/// Replaces any feedback message on the page with a new one at the top of `form`.
///
/// The message starts fading after `lifetime.visible` and leaves the document
/// `lifetime.fade` later.
pub(crate) fn show(
    platform: &dyn Platform,
    form: NodeRef,
    text: &str,
    kind: MessageKind,
    lifetime: Lifetime,
) -> Result<NodeRef, PlatformError> {
    if let Some(existing) = platform.query(FORM_MESSAGE_SELECTOR) {
        platform.remove(existing)?;
    }

    let node = platform.create_element("div")?;
    platform.set_attribute(node, "class", &format!("{FORM_MESSAGE_CLASS} {}", kind.as_ref()))?;
    platform.set_text_content(node, text)?;
    for (property, value) in BASE_STYLE.into_iter().chain(kind.palette()) {
        platform.set_style(node, property, value)?;
    }
    platform.prepend_child(form, node)?;

    platform.set_timeout(
        lifetime.visible,
        Box::new(move |p: &dyn Platform| {
            if let Err(e) = fade_out(p, node, lifetime.fade) {
                warn!(error = %e, "Failed to fade form message");
            }
        }),
    )?;

    Ok(node)
}

fn fade_out(platform: &dyn Platform, node: NodeRef, fade: Duration) -> Result<(), PlatformError> {
    trace!(node = node.raw(), "Fading form message");
    platform.set_style(node, "opacity", "0")?;
    let transition = format!("opacity {}s ease-out", fade.as_secs_f64());
    platform.set_style(node, "transition", &transition)?;
    platform.set_timeout(
        fade,
        Box::new(move |p: &dyn Platform| {
            if let Err(e) = p.remove(node) {
                warn!(error = %e, "Failed to remove form message");
            }
        }),
    )?;
    Ok(())
}
