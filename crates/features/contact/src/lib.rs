//! Contact form feature slice.
//!
//! Submission never leaves the page: the form is validated locally, the visitor gets a
//! short-lived success or error message at the top of the form, and a valid form is reset.

mod error;
mod message;
mod validation;

pub use crate::error::ContactError;
pub use crate::message::MessageKind;
pub use crate::validation::{EMAIL_PATTERN, Fields, Rejection, collect_fields, validate};

use crate::message::Lifetime;
use regex::Regex;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};
use vitae_domain::config::{ContactConfig, SiteConfig};
use vitae_domain::constants::{CONTACT, CONTACT_FORM_ID};
use vitae_domain::registry::ModuleRecord;
use vitae_platform::{Event, EventKind, EventTarget, ListenerId, NodeRef, Platform, PlatformError};

/// Result of a handled submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected(Rejection),
}

#[derive(Debug)]
pub struct Contact {
    form: Option<NodeRef>,
    config: ContactConfig,
    email: Regex,
    last: Cell<Option<Submission>>,
    message: Cell<Option<NodeRef>>,
    listener: Cell<Option<ListenerId>>,
    submitted_fields: RefCell<Vec<String>>,
}

/// Initialize the contact slice. A page without the form gets an inert record.
///
/// # Errors
/// Returns [`ContactError::Pattern`] if the email pattern does not compile and
/// [`ContactError::Platform`] if the submit listener cannot be registered.
pub fn init(
    platform: &Rc<dyn Platform>,
    config: &SiteConfig,
) -> Result<ModuleRecord, ContactError> {
    let contact = Rc::new(Contact::new(&**platform, &config.contact)?);
    let record = ModuleRecord::new(CONTACT, Rc::clone(&contact));

    let Some(form) = contact.form else {
        debug!("No contact form on the page");
        return Ok(record);
    };

    let this = Rc::clone(&contact);
    let id = platform.listen(
        EventTarget::Node(form),
        EventKind::Submit,
        Box::new(move |p: &dyn Platform, event: &Event| {
            event.prevent_default();
            if let Err(e) = this.submit(p) {
                warn!(error = %e, "Failed to handle contact form submission");
            }
        }),
    )?;
    contact.listener.set(Some(id));
    debug!("Contact slice initialized");

    let platform = Rc::clone(platform);
    Ok(record.with_teardown(move || contact.destroy(&*platform)))
}

impl Contact {
    /// # Errors
    /// Returns [`ContactError::Pattern`] if the email pattern does not compile.
    pub fn new(platform: &dyn Platform, config: &ContactConfig) -> Result<Self, ContactError> {
        Ok(Self {
            form: platform.element_by_id(CONTACT_FORM_ID),
            config: config.clone(),
            email: Regex::new(EMAIL_PATTERN)?,
            last: Cell::new(None),
            message: Cell::new(None),
            listener: Cell::new(None),
            submitted_fields: RefCell::default(),
        })
    }

    /// Outcome of the most recent submission.
    #[must_use]
    pub fn last_submission(&self) -> Option<Submission> {
        self.last.get()
    }

    /// The feedback message most recently inserted, which may since have been removed.
    #[must_use]
    pub fn last_message(&self) -> Option<NodeRef> {
        self.message.get()
    }

    /// Field names of the last accepted submission.
    #[must_use]
    pub fn submitted_fields(&self) -> Vec<String> {
        self.submitted_fields.borrow().clone()
    }

    /// Validates the form, shows feedback and resets it when valid.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the form cannot be read or the message cannot be shown.
    pub fn submit(&self, platform: &dyn Platform) -> Result<Submission, PlatformError> {
        let Some(form) = self.form else {
            return Err(PlatformError::Unsupported {
                message: "no contact form on the page".into(),
                context: None,
            });
        };

        let fields = collect_fields(platform.form_entries(form)?);
        let outcome = match validate(&fields, &self.email) {
            Ok(()) => {
                self.show(platform, form, &self.config.success_text, MessageKind::Success)?;
                platform.reset_form(form)?;

                let mut names: Vec<String> = fields.into_keys().collect();
                names.sort_unstable();
                debug!(fields = ?names, "Contact form submitted");
                *self.submitted_fields.borrow_mut() = names;
                Submission::Accepted
            },
            Err(rejection) => {
                debug!(reason = %rejection, "Contact form rejected");
                self.show(platform, form, rejection.message(&self.config), MessageKind::Error)?;
                Submission::Rejected(rejection)
            },
        };

        self.last.set(Some(outcome));
        Ok(outcome)
    }

    /// Unregisters the submit listener. Safe to call more than once.
    pub fn destroy(&self, platform: &dyn Platform) {
        if let Some(id) = self.listener.take() {
            platform.unlisten(id);
        }
    }

    fn show(
        &self,
        platform: &dyn Platform,
        form: NodeRef,
        text: &str,
        kind: MessageKind,
    ) -> Result<(), PlatformError> {
        let lifetime =
            Lifetime { visible: self.config.message_lifetime(), fade: self.config.fade() };
        let node = message::show(platform, form, text, kind, lifetime)?;
        self.message.set(Some(node));
        Ok(())
    }
}
