//! Identity of the caller performing an operation.

use common::UserId;

/// Verified identity supplied by the authentication layer.
///
/// The ledger only records the user id; credentials are never seen here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: UserId,
}

impl CallerIdentity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
