//! OAuth device-code flow, credential storage and token refresh.

pub mod device_code;
pub mod error;
pub mod refresh;
pub mod store;
pub mod token;

pub use device_code::{DeviceAuthClient, DeviceAuthorization, PollOutcome};
pub use error::AuthError;
pub use refresh::TokenRefresher;
pub use store::{CredentialStore, FileCredentialStore};
pub use token::{now_epoch_secs, Credential, TokenResponse, REFRESH_BUFFER_SECS};
