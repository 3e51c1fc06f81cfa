use serde::{Deserialize, Serialize};

/// Projection of the `profiles` table consumed by the dispatchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub full_name: Option<String>,
    pub fcm_token: Option<String>,
}

impl Profile {
    /// The registration token to push to, if this profile can receive
    /// pushes at all. An empty token counts as absent.
    pub fn push_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|token| !token.is_empty())
    }
}
