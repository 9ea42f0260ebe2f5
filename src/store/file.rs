//! File-backed [`TokenStore`] so the access token survives process restarts.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{PersistedToken, StoreError, StoreFuture, TokenStore},
};

/// Default well-known path of the cached token file, relative to the working
/// directory.
pub const DEFAULT_TOKEN_PATH: &str = ".catalog_token.json";

/// Persists the access token to a single JSON file after every successful
/// exchange.
///
/// Reads never fail: a missing, unreadable, or malformed file is simply an
/// absent token. Writes go through a temp file + rename so a torn write is
/// read back as absent rather than as partial content. The file is
/// overwritten on every exchange and never deleted by this crate.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
}
impl FileStore {
	/// Store at the crate's default well-known path.
	pub fn new() -> Self {
		Self::at(DEFAULT_TOKEN_PATH)
	}

	/// Store at a caller-provided path.
	pub fn at(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	fn load_now(path: &Path) -> Option<TokenSecret> {
		let bytes = match fs::read(path) {
			Ok(bytes) => bytes,
			Err(e) => {
				if e.kind() != ErrorKind::NotFound {
					tracing::warn!(
						path = %path.display(),
						error = %e,
						"failed to read the cached token file, treating it as absent",
					);
				}

				return None;
			},
		};

		match serde_json::from_slice::<PersistedToken>(&bytes) {
			Ok(persisted) => Some(persisted.access_token),
			Err(e) => {
				tracing::warn!(
					path = %path.display(),
					error = %e,
					"cached token file is malformed, treating it as absent",
				);

				None
			},
		}
	}

	fn save_now(path: &Path, token: &TokenSecret) -> Result<(), StoreError> {
		Self::ensure_parent_exists(path)?;

		let serialized = serde_json::to_vec(&PersistedToken { access_token: token.clone() })
			.map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize the cached token: {e}"),
			})?;
		let mut tmp_path = path.to_path_buf();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}
}
impl Default for FileStore {
	fn default() -> Self {
		Self::new()
	}
}
impl TokenStore for FileStore {
	fn load(&self) -> StoreFuture<'_, Option<TokenSecret>> {
		Box::pin(async move { Ok(Self::load_now(&self.path)) })
	}

	fn save<'a>(&'a self, token: &'a TokenSecret) -> StoreFuture<'a, ()> {
		Box::pin(async move { Self::save_now(&self.path, token) })
	}
}
