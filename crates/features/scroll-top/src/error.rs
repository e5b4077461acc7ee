use std::borrow::Cow;
use vitae_platform::PlatformError;

/// A specialized [`ScrollTopError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum ScrollTopError {
    /// The host refused a listener during setup.
    #[error("Scroll-to-top platform error{}: {source}", format_context(.context))]
    Platform {
        #[source]
        source: PlatformError,
        context: Option<Cow<'static, str>>,
    },
}

impl From<PlatformError> for ScrollTopError {
    fn from(source: PlatformError) -> Self {
        Self::Platform { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
