#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use astralform_mcp::api::Gateway;
use astralform_mcp::auth::{now_epoch_secs, AuthError, Credential, CredentialStore};
use astralform_mcp::config::AstralformConfig;
use wiremock::MockServer;

#[derive(Default)]
pub struct InMemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
    saves: AtomicUsize,
    clears: AtomicUsize,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(credential: Credential) -> Self {
        let store = Self::default();
        store.seed(credential);
        store
    }

    pub fn seed(&self, credential: Credential) {
        *self.credential.lock().expect("store lock poisoned") = Some(credential);
    }

    pub fn get(&self) -> Option<Credential> {
        self.credential.lock().expect("store lock poisoned").clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.get()
    }

    fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.seed(credential.clone());
        Ok(())
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.credential.lock().expect("store lock poisoned") = None;
    }
}

/// Credential expiring `expires_in` seconds from now.
pub fn credential(access_token: &str, expires_in: f64) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        refresh_token: format!("{access_token}-refresh"),
        expires_at: now_epoch_secs() + expires_in,
        token_type: "Bearer".to_string(),
    }
}

pub fn config_for(server: &MockServer) -> AstralformConfig {
    AstralformConfig::default()
        .with_api_url(server.uri())
        .with_docs_url(server.uri())
}

pub fn gateway_for(server: &MockServer, store: Arc<InMemoryCredentialStore>) -> Gateway {
    Gateway::new(&config_for(server), store)
}
