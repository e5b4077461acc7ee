use std::borrow::Cow;
use vitae_platform::PlatformError;

/// A specialized [`ContactError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    /// The email pattern failed to compile.
    #[error("Contact pattern error{}: {source}", format_context(.context))]
    Pattern {
        #[source]
        source: regex::Error,
        context: Option<Cow<'static, str>>,
    },
    /// The host refused a listener, timer or DOM mutation.
    #[error("Contact platform error{}: {source}", format_context(.context))]
    Platform {
        #[source]
        source: PlatformError,
        context: Option<Cow<'static, str>>,
    },
}

impl From<PlatformError> for ContactError {
    fn from(source: PlatformError) -> Self {
        Self::Platform { source, context: None }
    }
}

impl From<regex::Error> for ContactError {
    fn from(source: regex::Error) -> Self {
        Self::Pattern { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
