//! The authenticated session and its single owner.
//!
//! [`SessionContext`] is the only place that reads, refreshes or expires the
//! session. Anything needing authorization borrows it.

pub mod clock;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::api::ApiResponse;
use crate::errors::{AnalyticsError, Result};
use crate::storage::SessionStore;

pub use clock::{Clock, FixedClock, SystemClock};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            role: None,
        }
    }
}

/// Body returned by the login and token-verification endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    pub issued_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            user: None,
            issued_at,
            expires_at: None,
        }
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.expires_at = ttl.map(|ttl| self.issued_at + ttl);
        self
    }

    /// Sessions without an expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|expiry| now >= expiry).unwrap_or(false)
    }
}

/// Everything persisted between launches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session: Session,
    /// Student profile fetched after login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
}

pub struct SessionContext {
    store: Box<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    ttl: Option<Duration>,
    snapshot: Option<SessionSnapshot>,
}

impl SessionContext {
    /// Restores whatever session the store holds, expired or not.
    pub fn load(store: Box<dyn SessionStore>, clock: Arc<dyn Clock>) -> Result<Self> {
        let snapshot = store.load()?;
        if let Some(snapshot) = &snapshot {
            if snapshot.session.is_expired_at(clock.now()) {
                tracing::info!("restored session has expired");
            }
        }
        Ok(Self {
            store,
            clock,
            ttl: None,
            snapshot,
        })
    }

    /// Lifetime applied to sessions started or refreshed from now on.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Starts a session from a login response, replacing any previous one.
    pub fn begin(&mut self, login: LoginPayload) -> Result<&Session> {
        let token = login
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| AnalyticsError::Session("login response carried no token".into()))?;
        let mut session = Session::new(token, self.clock.now()).with_ttl(self.ttl);
        session.user = login.user;
        self.persist(SessionSnapshot {
            session,
            profile: None,
        })?;
        tracing::info!("session started");
        self.current()
    }

    /// Applies a token-verification response.
    ///
    /// A new token restarts the session lifetime; a response without one only
    /// updates the user. Without an existing session this behaves like
    /// [`SessionContext::begin`].
    pub fn refresh(&mut self, login: LoginPayload) -> Result<&Session> {
        let Some(mut snapshot) = self.snapshot.clone() else {
            return self.begin(login);
        };
        if let Some(token) = login.token.filter(|token| !token.trim().is_empty()) {
            snapshot.session.token = token;
            snapshot.session.issued_at = self.clock.now();
            snapshot.session.expires_at = self.ttl.map(|ttl| snapshot.session.issued_at + ttl);
        }
        if let Some(user) = login.user {
            snapshot.session.user = Some(user);
        }
        self.persist(snapshot)?;
        tracing::debug!("session refreshed");
        self.current()
    }

    /// Applies the outcome of a token-verification request.
    ///
    /// An unreachable server leaves the session untouched and reports the
    /// network error. Any response rejecting the token ends the session.
    pub fn apply_verification(
        &mut self,
        response: ApiResponse<LoginPayload>,
    ) -> Result<Option<&Session>> {
        if response.is_network_failure() {
            tracing::warn!("token verification unreachable, keeping session");
            return Err(response_error(response));
        }
        match response {
            ApiResponse {
                success: true,
                data: Some(payload),
                ..
            } => self.refresh(payload).map(Some),
            rejected => {
                tracing::info!(status = rejected.status, "token rejected");
                self.end()?;
                Ok(None)
            }
        }
    }

    /// Logs out: forgets the session and clears the store.
    pub fn end(&mut self) -> Result<()> {
        self.snapshot = None;
        self.store.clear()?;
        tracing::info!("session ended");
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.snapshot.as_ref().map(|snapshot| &snapshot.session)
    }

    pub fn is_active(&self) -> bool {
        self.session()
            .map(|session| !session.is_expired_at(self.clock.now()))
            .unwrap_or(false)
    }

    /// Token to authorize requests with; `None` once the session has expired.
    pub fn bearer_token(&self) -> Option<&str> {
        self.session()
            .filter(|session| !session.is_expired_at(self.clock.now()))
            .map(|session| session.token.as_str())
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.session().and_then(|session| session.user.as_ref())
    }

    pub fn profile(&self) -> Option<&Value> {
        self.snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.profile.as_ref())
    }

    pub fn set_profile(&mut self, profile: Value) -> Result<()> {
        let mut snapshot = self
            .snapshot
            .clone()
            .ok_or_else(|| AnalyticsError::Session("no active session".into()))?;
        snapshot.profile = Some(profile);
        self.persist(snapshot)
    }

    fn persist(&mut self, snapshot: SessionSnapshot) -> Result<()> {
        self.store.save(&snapshot)?;
        self.snapshot = Some(snapshot);
        Ok(())
    }

    fn current(&self) -> Result<&Session> {
        self.session()
            .ok_or_else(|| AnalyticsError::Session("no active session".into()))
    }
}

fn response_error<T>(response: ApiResponse<T>) -> AnalyticsError {
    AnalyticsError::Api {
        status: response.status,
        message: response
            .error
            .unwrap_or_else(|| crate::api::NETWORK_ERROR_MESSAGE.to_string()),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {}",
            other
        ))),
    }
}
