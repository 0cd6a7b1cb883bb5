//! Player script discovery
//!
//! The web player script provides two things: the `signatureTimestamp` the
//! player endpoint wants in its playback context, and the signature transform.

use crate::error::{ExtractError, Result};
use crate::youtube::cipher::SignatureCipher;

/// Metadata extracted from one player script version
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub signature_timestamp: Option<u64>,
    /// None when the transform could not be extracted; entries that need
    /// deciphering are then unresolvable.
    pub cipher: Option<SignatureCipher>,
}

impl Player {
    /// Build from a downloaded base.js.
    pub fn from_script(id: &str, js: &str) -> Self {
        let cipher = match SignatureCipher::from_player_js(js) {
            Ok(cipher) => Some(cipher),
            Err(e) => {
                tracing::warn!("Player {}: {}", id, e);
                None
            }
        };

        Player {
            id: id.to_string(),
            signature_timestamp: signature_timestamp(js),
            cipher,
        }
    }

    pub fn decipher(&self, signature_cipher: &str) -> Result<String> {
        self.cipher
            .as_ref()
            .ok_or_else(|| {
                ExtractError::Decipher(format!("no signature transform for player {}", self.id))
            })?
            .decipher_url(signature_cipher)
    }
}

/// Find the player id in the iframe API loader.
pub fn player_id(iframe_api: &str) -> Result<String> {
    regex!(r"player\\?/([0-9a-fA-F]{8})\\?/")
        .captures(iframe_api)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ExtractError::Player("player id not found in iframe_api".to_string()))
}

/// Path of the player script for a player id.
pub fn player_script_path(id: &str) -> String {
    format!("/s/player/{}/player_ias.vflset/en_US/base.js", id)
}

fn signature_timestamp(js: &str) -> Option<u64> {
    regex!(r"(?:signatureTimestamp|sts)\s*:\s*(\d+)")
        .captures(js)
        .and_then(|caps| caps[1].parse().ok())
}
