use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::profile::Profile;

/// Composed notification content for one recipient. Pairing it with a
/// recipient and deciding whether to send happens downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

impl PushNotification {
    /// Notification for the liked user. The liker stays anonymous until
    /// the pair matches; only the data payload carries the liker id.
    pub fn for_like(liker: Option<&Profile>) -> Self {
        let mut data = HashMap::new();
        data.insert("type".to_string(), "new_like".to_string());
        data.insert(
            "likerId".to_string(),
            liker.map(|profile| profile.id.clone()).unwrap_or_default(),
        );

        Self {
            title: "New Like! ❤️".to_string(),
            body: "Someone just liked your profile! Open the app to see who.".to_string(),
            data,
        }
    }

    /// Notification for one side of a match, naming the other side.
    pub fn for_match(other: Option<&Profile>) -> Self {
        let name = other
            .and_then(|profile| profile.full_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("someone");

        let mut data = HashMap::new();
        data.insert("type".to_string(), "new_match".to_string());
        data.insert(
            "matchId".to_string(),
            other.map(|profile| profile.id.clone()).unwrap_or_default(),
        );

        Self {
            title: "It's a Match! 🎉".to_string(),
            body: format!("You and {} liked each other!", name),
            data,
        }
    }
}
