//! Full-screen OTP verification screen for crib.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use crib_core::api::BackendClient;
use crib_core::config::Config;
use crib_core::session::VerificationSession;
use crib_core::store::{CredentialStore, Credentials};
pub use runtime::{FlowDriver, TuiRuntime};
pub use state::FlowSettings;

/// How the verification screen was left.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowExit {
    /// Verified and logged in.
    Authenticated(Credentials),
    /// The user quit before finishing.
    Cancelled,
}

/// Runs the verification screen until the user verifies or quits.
pub async fn run_verification(
    config: &Config,
    client: BackendClient,
    store: CredentialStore,
    session: VerificationSession,
) -> Result<FlowExit> {
    if !stderr().is_terminal() {
        anyhow::bail!("Verification requires a terminal.");
    }

    tracing::info!(user_id = %session.user_id, "opening verification screen");
    let driver = FlowDriver::new(session, FlowSettings::from_config(config), client, store);
    let mut runtime = TuiRuntime::new(driver)?;
    runtime.run()?;

    let exit = match runtime.driver.state.tui.authenticated.take() {
        Some(credentials) => FlowExit::Authenticated(credentials),
        None => FlowExit::Cancelled,
    };
    drop(runtime);
    Ok(exit)
}
