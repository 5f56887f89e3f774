//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// The `Display` text of the validation variants is the notice shown to the
/// visitor.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required form field was left blank.
    #[error("Por favor, preencha todos os campos obrigatórios.")]
    MissingFields,

    /// Password and confirmation differ.
    #[error("As senhas não coincidem.")]
    PasswordMismatch,

    /// Password shorter than the minimum length.
    #[error("A senha deve ter pelo menos {min} caracteres.")]
    WeakPassword {
        /// Minimum number of characters.
        min: usize,
    },

    /// Invalid email format.
    #[error("Informe um e-mail válido.")]
    InvalidEmail(#[from] total_aereas_core::EmailError),

    /// Unknown social sign-in provider.
    #[error("unknown sign-in provider: {0}")]
    UnknownProvider(String),

    /// The identity provider rejected or failed the call.
    #[error("identity provider error: {0}")]
    Provider(String),
}
