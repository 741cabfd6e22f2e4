//! Authenticated request context

use serde::{Deserialize, Serialize};
use shared::models::{User, UserRole};

/// The user behind a valid session, injected into request extensions by
/// [`require_auth`](crate::auth::require_auth)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub role: UserRole,
    pub rh_no: Option<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Member id to stamp on receipts this user files
    pub fn member_id(&self) -> Option<i64> {
        match self.role {
            UserRole::Member => Some(self.id),
            UserRole::Admin => None,
        }
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
            rh_no: user.rh_no.clone(),
        }
    }
}
