//! Expiry inspection for the service's access tokens.
//!
//! The token is a JWT whose signature only the server can verify; the client
//! merely reads the embedded `expires` claim to decide whether presenting the
//! token is worthwhile. No cryptographic verification happens here.

// crates.io
use base64::{
	Engine as _,
	engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
// self
use crate::_prelude::*;

/// Claims carried in the access-token payload.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenClaims {
	/// Expiry as whole seconds since the Unix epoch; absent means already expired.
	#[serde(default)]
	pub expires: i64,
}

/// Failure while decoding the token payload; never escapes [`is_expired`].
#[derive(Debug, ThisError)]
pub(crate) enum ClaimsError {
	#[error("Token is not a dot-separated JWT.")]
	Malformed,
	#[error("Token payload is not valid base64.")]
	Base64(#[from] base64::DecodeError),
	#[error("Token payload is not a JSON claims object.")]
	Json(#[from] serde_json::Error),
}

/// Decodes the claims segment without verifying the signature.
pub(crate) fn decode_unverified(token: &str) -> Result<TokenClaims, ClaimsError> {
	let payload = token.split('.').nth(1).ok_or(ClaimsError::Malformed)?;
	let bytes = decode_segment(payload)?;

	Ok(serde_json::from_slice(&bytes)?)
}

// Issuers disagree on padding; accept both the unpadded and padded alphabets.
fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
	URL_SAFE_NO_PAD.decode(segment).or_else(|e| {
		let trimmed = segment.trim_end_matches('=');
		let mut padded = trimmed.to_string();

		while padded.len() % 4 != 0 {
			padded.push('=');
		}

		URL_SAFE.decode(padded).map_err(|_| e)
	})
}

/// Returns `true` when `token` must not be presented to the service at `now`.
///
/// A token is usable only while its `expires` claim is strictly in the future.
/// A token whose claims cannot be decoded is reported as expired so the caller
/// re-authenticates instead of presenting garbage; the verdict is always
/// definite and decoding failures never propagate.
pub(crate) fn is_expired(token: &str, now: OffsetDateTime) -> bool {
	match decode_unverified(token) {
		Ok(claims) => claims.expires <= now.unix_timestamp(),
		Err(e) => {
			tracing::warn!(error = %e, "failed to decode access-token claims, treating token as expired");

			true
		},
	}
}
