//! Authentication service.
//!
//! Sign-in goes through an [`IdentityProvider`]. The only implementation is
//! [`MockIdentityProvider`], which waits a fixed delay and then answers with
//! a synthetic identity; it never rejects. Input validation lives here too so
//! the routes can report problems before the provider is called.

mod error;

pub use error::AuthError;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::broadcast;

use total_aereas_core::{Email, UserId};

use crate::models::CurrentUser;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Fixed uid of the demo (anonymous) identity.
pub const DEMO_USER_ID: &str = "mock-user-123";

/// Email returned by every social sign-in.
const SOCIAL_EMAIL: &str = "user@example.com";

/// Capacity of the auth event channel.
const EVENT_CAPACITY: usize = 64;

// =============================================================================
// Input Validation
// =============================================================================

/// Validated email/password pair.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Validate a login submission.
///
/// # Errors
///
/// Returns `AuthError::MissingFields` if either field is blank and
/// `AuthError::InvalidEmail` if the email is malformed.
pub fn validate_login(email: &str, password: &str) -> Result<Credentials, AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    Ok(Credentials {
        email: Email::parse(email)?,
        password: password.to_owned(),
    })
}

/// Validate a registration submission.
///
/// Checks run in this order: required fields, confirmation match, minimum
/// length, email format.
///
/// # Errors
///
/// Returns the [`AuthError`] for the first failed check.
pub fn validate_registration(
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<Credentials, AuthError> {
    if email.trim().is_empty() || password.is_empty() || password_confirm.is_empty() {
        return Err(AuthError::MissingFields);
    }

    if password != password_confirm {
        return Err(AuthError::PasswordMismatch);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(Credentials {
        email: Email::parse(email)?,
        password: password.to_owned(),
    })
}

// =============================================================================
// Provider Contract
// =============================================================================

/// Third-party sign-in providers offered on the login and register pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl SocialProvider {
    /// Name shown to visitors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
        }
    }

    /// Path segment used in sign-in routes.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
        }
    }
}

impl FromStr for SocialProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            _ => Err(AuthError::UnknownProvider(s.to_owned())),
        }
    }
}

/// How an identity was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInMethod {
    Password,
    Registration,
    Social(SocialProvider),
    Anonymous,
}

/// Change notification published by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn {
        user: CurrentUser,
        method: SignInMethod,
    },
    SignedOut {
        uid: UserId,
    },
}

/// An identity provider.
///
/// The site only needs a handful of calls; a real provider would slot in
/// behind this trait without touching the routes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Initial auth state for a new browser session.
    async fn restore(&self) -> Result<Option<CurrentUser>, AuthError>;

    /// Sign in with email and password.
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<CurrentUser, AuthError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, credentials: &Credentials) -> Result<CurrentUser, AuthError>;

    /// Sign in through a social provider.
    async fn sign_in_with_provider(
        &self,
        provider: SocialProvider,
    ) -> Result<CurrentUser, AuthError>;

    /// Sign in as the shared demo identity.
    async fn sign_in_anonymously(&self) -> Result<CurrentUser, AuthError>;

    /// Sign out.
    async fn sign_out(&self, user: &CurrentUser) -> Result<(), AuthError>;

    /// Subscribe to sign-in/sign-out notifications.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

// =============================================================================
// Mock Provider
// =============================================================================

/// Identity provider that answers every call with synthetic data after a
/// fixed delay.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    delay: Duration,
    events: broadcast::Sender<AuthEvent>,
}

impl MockIdentityProvider {
    /// Create a provider that waits `delay` before answering.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { delay, events }
    }

    async fn settle(&self) {
        tokio::time::sleep(self.delay).await;
    }

    fn publish(&self, event: AuthEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn signed_in(&self, user: CurrentUser, method: SignInMethod) -> CurrentUser {
        self.publish(AuthEvent::SignedIn {
            user: user.clone(),
            method,
        });
        user
    }
}

/// Synthetic identity for an email-based sign-in.
fn email_identity(email: &Email) -> CurrentUser {
    CurrentUser {
        uid: UserId::from_millis(Utc::now().timestamp_millis()),
        email: Some(email.clone()),
        display_name: Some(email.local_part().to_owned()),
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn restore(&self) -> Result<Option<CurrentUser>, AuthError> {
        self.settle().await;
        Ok(None)
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<CurrentUser, AuthError> {
        self.settle().await;
        let user = email_identity(&credentials.email);
        Ok(self.signed_in(user, SignInMethod::Password))
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<CurrentUser, AuthError> {
        self.settle().await;
        let user = email_identity(&credentials.email);
        Ok(self.signed_in(user, SignInMethod::Registration))
    }

    async fn sign_in_with_provider(
        &self,
        provider: SocialProvider,
    ) -> Result<CurrentUser, AuthError> {
        self.settle().await;
        let user = CurrentUser {
            uid: UserId::from_millis(Utc::now().timestamp_millis()),
            email: Email::parse(SOCIAL_EMAIL).ok(),
            display_name: Some("Usuário Social".to_owned()),
        };
        Ok(self.signed_in(user, SignInMethod::Social(provider)))
    }

    async fn sign_in_anonymously(&self) -> Result<CurrentUser, AuthError> {
        self.settle().await;
        let user = CurrentUser {
            uid: UserId::new(DEMO_USER_ID),
            email: None,
            display_name: Some("Usuário Anônimo".to_owned()),
        };
        Ok(self.signed_in(user, SignInMethod::Anonymous))
    }

    async fn sign_out(&self, user: &CurrentUser) -> Result<(), AuthError> {
        self.settle().await;
        self.publish(AuthEvent::SignedOut {
            uid: user.uid.clone(),
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_rejects_blank_fields() {
        assert!(matches!(
            validate_registration("", "segredo1", "segredo1"),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            validate_registration("a@b.com", "segredo1", ""),
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_registration_checks_mismatch_before_length() {
        let err = validate_registration("a@b.com", "abc", "abd").unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
        assert_eq!(err.to_string(), "As senhas não coincidem.");
    }

    #[test]
    fn test_registration_minimum_length() {
        let err = validate_registration("a@b.com", "12345", "12345").unwrap_err();
        assert_eq!(err.to_string(), "A senha deve ter pelo menos 6 caracteres.");
        assert!(validate_registration("a@b.com", "123456", "123456").is_ok());
    }

    #[test]
    fn test_registration_counts_characters_not_bytes() {
        // five characters, ten bytes
        let err = validate_registration("a@b.com", "ããããã", "ããããã").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword { min: 6 }));
    }

    #[test]
    fn test_login_validation() {
        assert!(matches!(validate_login("a@b.com", ""), Err(AuthError::MissingFields)));
        assert!(matches!(validate_login("ab.com", "x"), Err(AuthError::InvalidEmail(_))));
        let credentials = validate_login(" a@b.com ", "x").unwrap();
        assert_eq!(credentials.email.as_str(), "a@b.com");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = validate_login("a@b.com", "super-secreta").unwrap();
        let debug = format!("{credentials:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secreta"));
    }

    #[test]
    fn test_social_provider_from_str() {
        assert_eq!("google".parse::<SocialProvider>().unwrap(), SocialProvider::Google);
        assert_eq!("Facebook".parse::<SocialProvider>().unwrap(), SocialProvider::Facebook);
        assert!("orkut".parse::<SocialProvider>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_waits_then_yields_no_user() {
        let provider = MockIdentityProvider::new(Duration::from_millis(100));
        let started = tokio::time::Instant::now();
        assert_eq!(provider.restore().await.unwrap(), None);
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_sign_in_derives_display_name() {
        let provider = MockIdentityProvider::new(Duration::from_millis(100));
        let credentials = validate_login("joana@obra.com", "qualquer").unwrap();
        let user = provider.sign_in_with_password(&credentials).await.unwrap();

        assert!(user.uid.as_str().starts_with(UserId::PREFIX));
        assert_eq!(user.display_name.as_deref(), Some("joana"));
        assert_eq!(user.email, Some(credentials.email));
    }

    #[tokio::test(start_paused = true)]
    async fn test_anonymous_sign_in_uses_demo_id() {
        let provider = MockIdentityProvider::new(Duration::ZERO);
        let user = provider.sign_in_anonymously().await.unwrap();
        assert_eq!(user.uid.as_str(), DEMO_USER_ID);
        assert_eq!(user.greeting_name(), "Usuário Anônimo");
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_follow_sign_in_and_out() {
        let provider = MockIdentityProvider::new(Duration::from_millis(10));
        let mut events = provider.subscribe();

        let user = provider
            .sign_in_with_provider(SocialProvider::Google)
            .await
            .unwrap();
        provider.sign_out(&user).await.unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::SignedIn {
                user: user.clone(),
                method: SignInMethod::Social(SocialProvider::Google),
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::SignedOut { uid: user.uid }
        );
    }
}
