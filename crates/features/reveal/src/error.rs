use std::borrow::Cow;
use vitae_platform::PlatformError;

/// A specialized [`RevealError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum RevealError {
    /// The host could not create the viewport watcher.
    #[error("Reveal observer error{}: {source}", format_context(.context))]
    Observer {
        #[source]
        source: PlatformError,
        context: Option<Cow<'static, str>>,
    },
}

impl From<PlatformError> for RevealError {
    fn from(source: PlatformError) -> Self {
        Self::Observer { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
