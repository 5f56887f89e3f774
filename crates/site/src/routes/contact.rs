//! Contact form route handler.
//!
//! Quote requests from the home page are validated and logged. Nothing is
//! sent anywhere.

use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use total_aereas_core::{Page, Section};

use super::Layout;
use super::home::HomeTemplate;
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::Flash;
use crate::models::product::MISSING_FIELDS_MESSAGE;

/// Notice shown after a successful submission.
pub const CONTACT_SENT_MESSAGE: &str =
    "Mensagem enviada com sucesso! Entraremos em contato em breve.";

/// Contact form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Name, email and message are required; phone is optional.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Handle a contact form submission.
///
/// POST /contact
///
/// An incomplete form re-renders the home page with the submitted values and
/// the missing-fields notice. A complete one is logged and the visitor is sent
/// back to the contact section with an empty form.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn submit(
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    if !form.is_complete() {
        let layout = Layout::load(&session, user, Some(Page::Home))
            .await?
            .with_notice(MISSING_FIELDS_MESSAGE);
        return Ok(HomeTemplate::new(layout, form).into_response());
    }

    tracing::info!(
        name = %form.name.trim(),
        email = %form.email.trim(),
        phone = %form.phone.trim(),
        message_len = form.message.trim().chars().count(),
        "Contact request received"
    );

    Flash::push(&session, CONTACT_SENT_MESSAGE).await?;
    Ok(Redirect::to(&Section::Contact.href()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, phone: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_phone_is_optional() {
        assert!(form("Joana", "joana@obra.com", "", "Preciso de uma tesoura").is_complete());
    }

    #[test]
    fn test_required_fields() {
        assert!(!form("", "joana@obra.com", "", "msg").is_complete());
        assert!(!form("Joana", " ", "", "msg").is_complete());
        assert!(!form("Joana", "joana@obra.com", "(11) 99999-9999", "").is_complete());
    }
}
