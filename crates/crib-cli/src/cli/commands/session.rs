//! Staging, credentials and the verification screen.

use anyhow::{Context, Result, bail};
use crib_core::api::BackendClient;
use crib_core::config::Config;
use crib_core::session::VerificationSession;
use crib_core::store::{CredentialStore, StoredUser};
use crib_tui::FlowExit;

pub fn stage(user_id: &str, email: &str, name: Option<String>) -> Result<()> {
    let session = VerificationSession::new(user_id, email)?;
    let mut user = StoredUser::new(session.user_id, session.email);
    user.name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    CredentialStore::open_default()
        .stage(&user)
        .context("stage user")?;
    println!("Staged {} for verification.", user.email);
    Ok(())
}

pub fn whoami() -> Result<()> {
    match CredentialStore::open_default().load()? {
        Some(credentials) => println!("{}", serde_json::to_string_pretty(&credentials)?),
        None => println!("Not logged in."),
    }
    Ok(())
}

pub async fn verify(config: &Config, user_id: Option<String>, email: Option<String>) -> Result<()> {
    let store = CredentialStore::open_default();
    let session = match (user_id, email) {
        (Some(user_id), Some(email)) => VerificationSession::new(user_id, email)?,
        (None, None) => {
            let Some(staged) = store.staged()? else {
                bail!("No staged user. Pass --user-id and --email, or run `crib stage` first.");
            };
            VerificationSession::new(staged.id, staged.email)?
        }
        _ => bail!("--user-id and --email must be given together"),
    };

    let client = BackendClient::from_config(config)?;
    match crib_tui::run_verification(config, client, store, session).await? {
        FlowExit::Authenticated(credentials) => {
            println!("Verified {}. Logged in.", credentials.user.email);
        }
        FlowExit::Cancelled => println!("Verification cancelled."),
    }
    Ok(())
}
