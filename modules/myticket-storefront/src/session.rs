//! Authentication gate in front of the selection/checkout flow.
//!
//! The session is an opaque provider token persisted under the `user`
//! key; this module only consumes it, never the provider's protocol.

use std::sync::Arc;

use tracing::warn;

use myticket_common::{MyTicketError, Session};

use crate::store::{BlobStore, SESSION_KEY};
use crate::traits::IdentityProvider;

/// Registration form fields, validated locally before the provider call.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

pub struct SessionGate {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn BlobStore>,
    session: Option<Session>,
}

impl SessionGate {
    /// Build the gate, restoring a persisted session if one exists.
    /// A corrupt blob is treated as logged-out, not as a crash.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn BlobStore>,
    ) -> Result<Self, MyTicketError> {
        let session = match store.get(SESSION_KEY)? {
            Some(blob) => match serde_json::from_str::<Session>(&blob) {
                Ok(session) => Some(session),
                Err(err) => {
                    warn!(%err, "Discarding unreadable persisted session");
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            provider,
            store,
            session,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Gate entry into selection/checkout: the session, or
    /// `NotAuthenticated` so the caller can route to the login screen.
    pub fn require_authenticated(&self) -> Result<&Session, MyTicketError> {
        self.session.as_ref().ok_or(MyTicketError::NotAuthenticated)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, MyTicketError> {
        let session = self.provider.sign_in(email, password).await?;
        let blob = serde_json::to_string(&session)
            .map_err(|e| MyTicketError::Store(e.to_string()))?;
        self.store.put(SESSION_KEY, &blob)?;
        Ok(self.session.insert(session))
    }

    /// Create an account. Validation failures never reach the provider;
    /// the new account is not logged in (the buyer signs in afterwards,
    /// matching the storefront's register-then-login sequence).
    pub async fn register(&self, registration: &Registration) -> Result<(), MyTicketError> {
        validate_registration(registration)?;
        self.provider
            .sign_up(&registration.email, &registration.password)
            .await?;
        Ok(())
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), MyTicketError> {
        if email.trim().is_empty() {
            return Err(MyTicketError::AuthFailed(
                "Please enter your email address.".to_string(),
            ));
        }
        Ok(self.provider.send_password_reset(email).await?)
    }

    pub fn logout(&mut self) -> Result<(), MyTicketError> {
        self.store.remove(SESSION_KEY)?;
        self.session = None;
        Ok(())
    }
}

fn validate_registration(registration: &Registration) -> Result<(), MyTicketError> {
    if registration.email.trim().is_empty()
        || registration.password.is_empty()
        || registration.confirm_password.is_empty()
    {
        return Err(MyTicketError::AuthFailed(
            "Please fill in all fields.".to_string(),
        ));
    }
    if registration.password != registration.confirm_password {
        return Err(MyTicketError::AuthFailed(
            "Passwords do not match!".to_string(),
        ));
    }
    if !registration.accepted_terms {
        return Err(MyTicketError::AuthFailed(
            "Please accept the Privacy Policy and Terms.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, MockIdentity};

    fn registration() -> Registration {
        Registration {
            email: "new@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
            accepted_terms: true,
        }
    }

    #[tokio::test]
    async fn login_persists_session_across_gates() {
        let provider = Arc::new(MockIdentity::new().with_user("buyer@example.com", "hunter2"));
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());

        let mut gate = SessionGate::new(provider.clone(), store.clone()).unwrap();
        assert!(!gate.is_authenticated());
        assert!(matches!(
            gate.require_authenticated(),
            Err(MyTicketError::NotAuthenticated)
        ));

        gate.login("buyer@example.com", "hunter2").await.unwrap();
        assert!(gate.is_authenticated());

        // A fresh gate over the same store restores the session.
        let restored = SessionGate::new(provider, store).unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(
            restored.require_authenticated().unwrap().email,
            "buyer@example.com"
        );
    }

    #[tokio::test]
    async fn failed_login_surfaces_provider_message() {
        let provider = Arc::new(MockIdentity::new().with_user("buyer@example.com", "hunter2"));
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let mut gate = SessionGate::new(provider, store).unwrap();

        let err = gate.login("buyer@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, MyTicketError::AuthFailed(m) if m == "INVALID_PASSWORD"));
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_persisted_session() {
        let provider = Arc::new(MockIdentity::new().with_user("buyer@example.com", "hunter2"));
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let mut gate = SessionGate::new(provider.clone(), store.clone()).unwrap();
        gate.login("buyer@example.com", "hunter2").await.unwrap();

        gate.logout().unwrap();
        assert!(!gate.is_authenticated());

        let restored = SessionGate::new(provider, store).unwrap();
        assert!(!restored.is_authenticated());
    }

    #[tokio::test]
    async fn corrupt_persisted_session_is_discarded() {
        let provider = Arc::new(MockIdentity::new());
        let store = Arc::new(MemoryStore::new());
        store.put(SESSION_KEY, "{not json").unwrap();

        let gate = SessionGate::new(provider, store).unwrap();
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn registration_validation_runs_before_the_provider() {
        let provider = Arc::new(MockIdentity::new());
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(provider, store).unwrap();

        let mut reg = registration();
        reg.confirm_password = "different".to_string();
        let err = gate.register(&reg).await.unwrap_err();
        assert!(matches!(err, MyTicketError::AuthFailed(m) if m == "Passwords do not match!"));

        let mut reg = registration();
        reg.accepted_terms = false;
        let err = gate.register(&reg).await.unwrap_err();
        assert!(
            matches!(err, MyTicketError::AuthFailed(m) if m == "Please accept the Privacy Policy and Terms.")
        );

        let mut reg = registration();
        reg.email = String::new();
        let err = gate.register(&reg).await.unwrap_err();
        assert!(matches!(err, MyTicketError::AuthFailed(m) if m == "Please fill in all fields."));

        gate.register(&registration()).await.unwrap();
    }

    #[tokio::test]
    async fn password_reset_requires_an_email() {
        let provider = Arc::new(MockIdentity::new().with_user("buyer@example.com", "hunter2"));
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(provider, store).unwrap();

        let err = gate.send_password_reset("  ").await.unwrap_err();
        assert!(matches!(err, MyTicketError::AuthFailed(_)));

        gate.send_password_reset("buyer@example.com").await.unwrap();
    }
}
