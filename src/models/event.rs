use serde_json::Value;

/// A validated like insert. Only rows with `type == "like"` produce one;
/// dislikes and malformed rows classify as a benign skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeEvent {
    pub user_id: String,
    pub target_user_id: String,
}

/// A validated match insert, one id per matched side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub user_a: String,
    pub user_b: String,
}

fn field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

impl LikeEvent {
    /// Extracts a like event from a raw webhook body.
    ///
    /// `None` is the skip path, not a failure: missing record, a dislike,
    /// or absent/empty user ids all mean the hook has nothing to do.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let record = payload.get("record")?;

        if record.get("type").and_then(Value::as_str) != Some("like") {
            return None;
        }

        let user_id = field(record, "user_id")?;
        let target_user_id = field(record, "target_user_id")?;

        Some(Self {
            user_id: user_id.to_string(),
            target_user_id: target_user_id.to_string(),
        })
    }

    /// Ids the resolver needs for this event, liker first.
    pub fn participant_ids(&self) -> Vec<String> {
        vec![self.user_id.clone(), self.target_user_id.clone()]
    }
}

impl MatchEvent {
    /// Extracts a match event from a raw webhook body. `None` means the
    /// payload is structurally invalid; unlike the like hook, the caller
    /// turns that into a client error.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let record = payload.get("record")?;
        let user_a = field(record, "user_a")?;
        let user_b = field(record, "user_b")?;

        Some(Self {
            user_a: user_a.to_string(),
            user_b: user_b.to_string(),
        })
    }

    pub fn participant_ids(&self) -> Vec<String> {
        vec![self.user_a.clone(), self.user_b.clone()]
    }
}
