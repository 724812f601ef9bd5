use serde::Serialize;

/// The signed-in user as shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub display_name: String,
    pub login_id: String,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, login_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            login_id: login_id.into(),
        }
    }
}

/// Source of the current caller's identity.
///
/// `None` means no identity is available (anonymous caller, lookup failure);
/// implementations log their own failures and never error.
pub trait IdentityProvider {
    fn current_identity(&self) -> Option<Identity>;
}

/// Provider for contexts with no signed-in user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_identity(&self) -> Option<Identity> {
        None
    }
}

/// A fixed identity, typically resolved earlier in request handling.
impl IdentityProvider for Identity {
    fn current_identity(&self) -> Option<Identity> {
        Some(self.clone())
    }
}

impl<T: IdentityProvider> IdentityProvider for Option<T> {
    fn current_identity(&self) -> Option<Identity> {
        self.as_ref().and_then(IdentityProvider::current_identity)
    }
}
