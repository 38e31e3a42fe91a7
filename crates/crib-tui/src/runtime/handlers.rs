//! Effect handlers.
//!
//! Each handler is a plain async function returning the `UiEvent` that
//! reports its result. Spawning and task bookkeeping stay in the runtime.

use crib_core::api::BackendClient;
use crib_core::error::FlowError;
use crib_core::session::VerificationSession;
use crib_core::store::CredentialStore;

use crate::events::UiEvent;

pub async fn verify_code(client: BackendClient, user_id: String, otp: String) -> UiEvent {
    let result = client.verify_otp(&user_id, &otp).await;
    UiEvent::VerificationFinished { result }
}

pub async fn resend_code(client: BackendClient, email: String, user_id: String) -> UiEvent {
    let result = client.resend_otp(&email, &user_id).await;
    UiEvent::ResendFinished { result }
}

/// Stores the verified session's login on the blocking pool.
pub async fn persist_credentials(store: CredentialStore, session: VerificationSession) -> UiEvent {
    let result = tokio::task::spawn_blocking(move || store.promote_staged(&session))
        .await
        .unwrap_or_else(|e| Err(FlowError::persistence(format!("Storage task failed: {e}"))));
    UiEvent::CredentialsPersisted { result }
}
