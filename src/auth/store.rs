use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::AuthError;
use super::token::Credential;

/// Storage abstraction for the single persisted credential record.
///
/// `load` never fails: unreadable or malformed data means "no session".
/// `clear` is best-effort and idempotent.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<Credential>;
    fn save(&self, credential: &Credential) -> Result<(), AuthError>;
    fn clear(&self);
}

/// File-backed credential store writing pretty JSON with owner-only access.
///
/// # Example
/// ```no_run
/// use astralform_mcp::auth::{Credential, CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::new("/tmp/astralform/credentials.json");
/// store.save(&Credential {
///     access_token: "access".to_string(),
///     refresh_token: "refresh".to_string(),
///     expires_at: 1_700_000_000.0,
///     token_type: "Bearer".to_string(),
/// })?;
/// # Ok::<(), astralform_mcp::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || parent.exists() {
            return Ok(());
        }
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(parent)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "credentials.json".to_string());
        self.path
            .with_file_name(format!("{name}.{}.tmp", std::process::id()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "credentials unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => Some(credential),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "credentials malformed");
                None
            }
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        Self::ensure_parent(&self.path)?;
        let serialized = serde_json::to_string_pretty(credential)?;

        // Write a sibling file then rename so readers never see a partial record.
        let tmp = self.temp_path();
        let mut options = fs::OpenOptions::new();
        options.create(true).truncate(true).write(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let write_result = options.open(&tmp).and_then(|mut file| {
            file.write_all(serialized.as_bytes())?;
            file.flush()
        });
        if let Err(err) = write_result.and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        tracing::debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "credentials cleared"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to clear credentials")
            }
        }
    }
}
