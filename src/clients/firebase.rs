use std::sync::Arc;

use gcp_auth::CustomServiceAccount;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

static SERVICE_ACCOUNT: OnceCell<Option<Arc<CustomServiceAccount>>> = OnceCell::const_new();

/// Parses the service-account JSON exactly once per process and hands out
/// the shared provider afterwards. Safe under concurrent first use; every
/// caller after the first gets the already-initialized slot.
///
/// A missing or malformed credential leaves the slot empty rather than
/// failing startup; sends then error at dispatch time.
pub async fn credentials(raw: Option<&str>) -> Option<Arc<CustomServiceAccount>> {
    SERVICE_ACCOUNT
        .get_or_init(|| async {
            let Some(raw) = raw else {
                warn!("FIREBASE_SERVICE_ACCOUNT is not set, push dispatch is disabled");
                return None;
            };

            match CustomServiceAccount::from_json(raw) {
                Ok(account) => {
                    info!("Firebase service account initialized");
                    Some(Arc::new(account))
                }
                Err(e) => {
                    error!(error = %e, "Failed to parse Firebase service account");
                    None
                }
            }
        })
        .await
        .clone()
}
