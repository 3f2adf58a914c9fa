use serde::Serialize;
use std::fmt;

pub const SUCCESS_MESSAGE: &str =
    "Message envoyé avec succès ! Je vous répondrai dans les plus brefs délais.";
pub const SEND_FAILED_MESSAGE: &str =
    "L'envoi a échoué. Merci de réessayer dans quelques instants.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactError {
    MissingFields,
    InvalidEmail,
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => f.write_str("Veuillez remplir tous les champs."),
            Self::InvalidEmail => f.write_str("Veuillez entrer une adresse email valide."),
        }
    }
}

impl std::error::Error for ContactError {}

/// Trims every field; empty fields are reported before a malformed address.
pub fn validate(name: &str, email: &str, message: &str) -> Result<ContactForm, ContactError> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }
    if !is_email_shaped(email) {
        return Err(ContactError::InvalidEmail);
    }

    Ok(ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// `local@domain.tld` where no part is empty and nothing contains whitespace
/// or a second `@`.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Inline status line under the form. Each new message gets a fresh serial so
/// a pending auto-hide for an older message cannot hide a newer one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormMessage {
    pub text: String,
    pub kind: MessageKind,
    pub serial: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormStatus {
    current: Option<FormMessage>,
    next_serial: u64,
}

impl FormStatus {
    pub fn current(&self) -> Option<&FormMessage> {
        self.current.as_ref()
    }

    /// Shows `text` and returns the serial to pass to [`FormStatus::expire`].
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.current = Some(FormMessage {
            text: text.into(),
            kind,
            serial,
        });
        serial
    }

    pub fn show_result(&mut self, result: &Result<ContactForm, ContactError>) -> u64 {
        match result {
            Ok(_) => self.show(SUCCESS_MESSAGE, MessageKind::Success),
            Err(err) => self.show(err.to_string(), MessageKind::Error),
        }
    }

    /// Hides the message if it is still the one identified by `serial`.
    pub fn expire(&mut self, serial: u64) {
        if self.current.as_ref().map(|message| message.serial) == Some(serial) {
            self.current = None;
        }
    }
}
