//! Shopper session: current user identity and bearer token.
//!
//! The token is carried explicitly in a [`Session`] value injected into the
//! API layer, rather than read from ambient global storage. This layer only
//! ever reads the token; signing in and out is the concern of whoever
//! constructs the session.

use marigold_core::UserId;
use secrecy::{ExposeSecret, SecretString};

/// The signed-in shopper, as reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Backend user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

/// An immutable view of the shopper's authentication state.
///
/// Anonymous sessions are valid: reads go out without an `Authorization`
/// header and the server decides what they may see.
#[derive(Clone)]
pub struct Session {
    user: Option<CurrentUser>,
    token: Option<SecretString>,
}

impl Session {
    /// A session with no signed-in user and no token.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
        }
    }

    /// A session for a signed-in shopper.
    #[must_use]
    pub fn authenticated(user: CurrentUser, token: SecretString) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    /// A session carrying a persisted token with no resolved user profile.
    ///
    /// This is the state right after startup, before the auth collaborator
    /// has confirmed who the token belongs to.
    #[must_use]
    pub fn with_token(token: SecretString) -> Self {
        Self {
            user: None,
            token: Some(token),
        }
    }

    /// The signed-in user, if known.
    #[must_use]
    pub const fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Whether a bearer token is available for requests.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Whether a user identity has been established.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Expose the raw token for building an `Authorization` header.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
