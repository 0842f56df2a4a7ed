use uuid::Uuid;

/// Identity of the user a request acts on behalf of.
///
/// Passed explicitly to every operation that needs an owner reference.
/// Authentication itself is an external collaborator; by the time the core
/// is called the user is already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: Uuid,
}

impl UserContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
