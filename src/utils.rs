use anyhow::{Error, Result};
use tracing::{debug, info};

use crate::{
    clients::{database::ProfileStore, fcm::PushSender},
    models::{
        event::{LikeEvent, MatchEvent},
        fcm::FcmMessage,
        notification::PushNotification,
        profile::Profile,
    },
};

/// How many pushes an invocation dispatched after token checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub sent: usize,
}

fn profile_for<'a>(profiles: &'a [Profile], id: &str) -> Option<&'a Profile> {
    profiles.iter().find(|profile| profile.id == id)
}

/// Dispatch for a validated like: resolve both parties in one lookup and
/// push to the target if they can receive pushes. A missing target row or
/// token is a silent skip; a lookup or send failure propagates.
pub async fn process_like_event(
    event: &LikeEvent,
    profiles: &dyn ProfileStore,
    push: &dyn PushSender,
    trace_id: &str,
) -> Result<DispatchOutcome, Error> {
    info!(
        trace_id,
        user_id = %event.user_id,
        target_user_id = %event.target_user_id,
        "Processing like event"
    );

    let rows = profiles.fetch_by_ids(&event.participant_ids()).await?;

    let liker = profile_for(&rows, &event.user_id);
    let target = profile_for(&rows, &event.target_user_id);

    let mut sent = 0;

    if let Some(token) = target.and_then(Profile::push_token) {
        let notification = PushNotification::for_like(liker);
        push.send(FcmMessage::new(token, &notification), trace_id)
            .await?;
        sent += 1;
    } else {
        debug!(trace_id, "Like target has no push token, skipping dispatch");
    }

    info!(trace_id, sent, "Like event processed");

    Ok(DispatchOutcome { sent })
}

/// Dispatch for a validated match: one lookup, then up to two pushes, each
/// naming the other party.
///
/// Sends are sequential and share one failure path: an error on the first
/// recipient aborts the invocation before the second send is attempted.
pub async fn process_match_event(
    event: &MatchEvent,
    profiles: &dyn ProfileStore,
    push: &dyn PushSender,
    trace_id: &str,
) -> Result<DispatchOutcome, Error> {
    info!(
        trace_id,
        user_a = %event.user_a,
        user_b = %event.user_b,
        "Processing match event"
    );

    let rows = profiles.fetch_by_ids(&event.participant_ids()).await?;

    let user_a = profile_for(&rows, &event.user_a);
    let user_b = profile_for(&rows, &event.user_b);

    let mut sent = 0;

    if let Some(token) = user_a.and_then(Profile::push_token) {
        let notification = PushNotification::for_match(user_b);
        push.send(FcmMessage::new(token, &notification), trace_id)
            .await?;
        sent += 1;
    } else {
        debug!(trace_id, side = "user_a", "No push token, skipping dispatch");
    }

    if let Some(token) = user_b.and_then(Profile::push_token) {
        let notification = PushNotification::for_match(user_a);
        push.send(FcmMessage::new(token, &notification), trace_id)
            .await?;
        sent += 1;
    } else {
        debug!(trace_id, side = "user_b", "No push token, skipping dispatch");
    }

    info!(trace_id, sent, "Match event processed");

    Ok(DispatchOutcome { sent })
}
