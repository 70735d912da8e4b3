use serde::{Deserialize, Serialize};

use crate::token::{AuthHeader, TokenSource};

/// Marketplace role of the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Professional,
    Clinic,
    Supplier,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Professional => write!(f, "professional"),
            Self::Clinic => write!(f, "clinic"),
            Self::Supplier => write!(f, "supplier"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl Role {
    /// Roles allowed into the admin dashboards.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Clinic)
    }
}

/// The user the identity provider vouched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    /// Tenant (clinic) the session is scoped to, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Session handle passed into services that need the current user.
pub struct SessionContext {
    user: CurrentUser,
    tokens: Box<dyn TokenSource>,
}

impl SessionContext {
    pub fn new(user: CurrentUser, tokens: impl TokenSource + 'static) -> Self {
        Self {
            user,
            tokens: Box::new(tokens),
        }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Auth header material for the next request, if any.
    pub fn auth_header(&self) -> Option<AuthHeader> {
        self.tokens.auth_header()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token material deliberately left out
        f.debug_struct("SessionContext")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}
