use backend_domain::{IdentityProvider, UserId};

/// Identity resolved once per request by the interface layer.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    user: Option<UserId>,
}

impl SessionIdentity {
    pub fn new(user: Option<UserId>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: impl Into<String>) -> Self {
        Self {
            user: Some(UserId::new(user)),
        }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}
