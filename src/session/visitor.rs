//! Locally synthesized visitor data
//!
//! Layout: field 1 (bytes, 16 random bytes), field 2 (varint, unix seconds),
//! encoded with the standard base64 alphabet.

use async_trait::async_trait;
use uuid::Uuid;

use super::encoding::{bytes_to_base64, encode_varint};
use super::{CredentialsProvider, SessionCredentials};
use crate::error::Result;

pub fn generate_visitor_data() -> String {
    visitor_data_from(Uuid::new_v4().as_bytes(), chrono::Utc::now().timestamp().max(0) as u64)
}

fn visitor_data_from(random: &[u8; 16], timestamp: u64) -> String {
    let mut data = Vec::with_capacity(2 + 16 + 1 + 10);
    data.extend_from_slice(&[0x0a, 0x10]);
    data.extend_from_slice(random);
    data.push(0x10);
    data.extend_from_slice(&encode_varint(timestamp));
    bytes_to_base64(&data, false)
}

/// Visitor data only, no token
pub struct VisitorProvider;

#[async_trait]
impl CredentialsProvider for VisitorProvider {
    async fn acquire_session_credentials(&self) -> Result<SessionCredentials> {
        Ok(SessionCredentials {
            session_id: Some(generate_visitor_data()),
            token: None,
        })
    }
}
