use tracing::warn;

/// What the HTTP client needs to set the Authorization header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthHeader {
    Basic { username: String, password: String },
    Bearer { token: String },
}

/// Where the session gets its auth material from.
///
/// Exactly one authoritative source per session. The historical behavior of
/// silently trying a second credential system on failure is not reproduced;
/// see [`LegacyTokenSource`] for the explicit, deprecated bridge.
pub trait TokenSource: Send + Sync {
    fn auth_header(&self) -> Option<AuthHeader>;
}

/// Fixed token handed over by the identity provider at session start.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    header: AuthHeader,
}

impl StaticTokenSource {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            header: AuthHeader::Bearer {
                token: token.into(),
            },
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            header: AuthHeader::Basic {
                username: username.into(),
                password: password.into(),
            },
        }
    }
}

impl TokenSource for StaticTokenSource {
    fn auth_header(&self) -> Option<AuthHeader> {
        Some(self.header.clone())
    }
}

/// Compat shim for sessions still minted by the legacy credential system.
///
/// Scheduled for removal once the migration to the identity provider
/// completes; every use is logged so remaining callers can be found.
#[deprecated(note = "migrate to the identity provider; this shim will be removed")]
pub struct LegacyTokenSource {
    token: String,
}

#[allow(deprecated)]
impl LegacyTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[allow(deprecated)]
impl TokenSource for LegacyTokenSource {
    fn auth_header(&self) -> Option<AuthHeader> {
        warn!("session authenticated through the deprecated legacy token source");
        Some(AuthHeader::Bearer {
            token: self.token.clone(),
        })
    }
}

/// Anonymous sessions (public catalog pages) attach no header.
pub struct AnonymousTokenSource;

impl TokenSource for AnonymousTokenSource {
    fn auth_header(&self) -> Option<AuthHeader> {
        None
    }
}
