//! Device pairing and user token derivation.
//!
//! A pairing code from the web app is exchanged once for a long-lived device
//! token. Every protected call then derives a fresh short-lived user token
//! from it; user tokens are never stored.

use crate::auth::credentials::CredentialStore;
use crate::cloud::CloudClient;
use crate::error::Result;

/// Register this device with `pairing_code` and persist the device token.
///
/// The store is only written after the server accepted the code.
pub async fn login(
    client: &CloudClient,
    store: &dyn CredentialStore,
    pairing_code: &str,
) -> Result<()> {
    let device_token = client.register_device(pairing_code).await?;

    store.save(&device_token)?;

    tracing::info!("Device paired, token saved to {}", store.location());
    Ok(())
}

/// Derive a fresh user token from the stored device token.
///
/// Fails with `MissingCredential` before touching the network when the
/// device was never paired.
pub async fn user_token(client: &CloudClient, store: &dyn CredentialStore) -> Result<String> {
    let device_token = store.load()?;
    client.issue_user_token(&device_token).await
}
