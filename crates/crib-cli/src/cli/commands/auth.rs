//! Sign-in and sign-out.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use crib_core::api::BackendClient;
use crib_core::config::Config;
use crib_core::error::FlowError;
use crib_core::store::CredentialStore;

const MISSING_FIELDS: &str = "Please fill all the fields";
const NETWORK_FAILURE: &str = "An error occurred. Check your network and try again";

pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let email = email.trim();
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    if email.is_empty() || password.is_empty() {
        bail!(MISSING_FIELDS);
    }

    let client = BackendClient::from_config(config)?;
    let signed_in = match client.sign_in(email, &password).await {
        Ok(signed_in) => signed_in,
        Err(FlowError::Network(detail)) => {
            tracing::warn!(%detail, "sign-in transport failure");
            bail!(NETWORK_FAILURE);
        }
        Err(e) => bail!("{e}"),
    };

    let store = CredentialStore::open_default();
    let credentials = store
        .save(signed_in.user)
        .context("Error with persisting user data.")?;
    tracing::info!(email = %credentials.user.email, "signed in");

    if signed_in.message.is_empty() {
        println!("Logged in as {}", credentials.user.email);
    } else {
        println!("{}", signed_in.message);
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = CredentialStore::open_default();
    if store.clear()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// First line of stdin, prompting when stdin is a terminal.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
