//! Stream signature deciphering
//!
//! Some manifest entries carry a `signatureCipher` instead of a URL. The
//! scrambled signature has to be passed through a transform defined in the
//! player script before it is appended to the URL. The transform is always a
//! short sequence of three primitive operations on a character array, so it
//! is extracted once per player and replayed in Rust.

use crate::error::{ExtractError, Result};

/// One primitive step of the signature transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherOp {
    Reverse,
    /// Drop the first n characters
    Splice(usize),
    /// Swap the first character with the one at n % len
    Swap(usize),
}

/// Signature transform extracted from a player script
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureCipher {
    ops: Vec<CipherOp>,
}

impl SignatureCipher {
    pub fn new(ops: Vec<CipherOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[CipherOp] {
        &self.ops
    }

    /// Extract the transform from the player's base.js.
    pub fn from_player_js(js: &str) -> Result<Self> {
        let body = regex!(
            r#"[a-zA-Z0-9_$]+=function\(\s*a\s*\)\s*\{\s*a\s*=\s*a\.split\(\s*""\s*\)\s*;(.*?)return\s+a\.join\(\s*""\s*\)"#
        )
        .captures(js)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ExtractError::Decipher("transform function not found".to_string()))?;

        let call_re = regex!(r#"([a-zA-Z0-9_$]+)(?:\.|\[")([a-zA-Z0-9_$]+)(?:"\])?\(\s*a\s*,\s*(\d+)\s*\)"#);

        let calls: Vec<(String, String, usize)> = call_re
            .captures_iter(body)
            .filter_map(|caps| {
                let arg = caps[3].parse().ok()?;
                Some((caps[1].to_string(), caps[2].to_string(), arg))
            })
            .collect();

        let helper_name = calls
            .first()
            .map(|(obj, _, _)| obj.clone())
            .ok_or_else(|| ExtractError::Decipher("transform has no steps".to_string()))?;

        let helper_re = regex::Regex::new(&format!(
            r"(?s)var\s+{}\s*=\s*\{{(.*?)\}};",
            regex::escape(&helper_name)
        ))
        .map_err(|e| ExtractError::Decipher(e.to_string()))?;
        let helper_body = helper_re
            .captures(js)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                ExtractError::Decipher(format!("helper object {} not found", helper_name))
            })?;

        let method_re =
            regex!(r"([a-zA-Z0-9_$]+)\s*:\s*function\s*\(\s*a\s*(?:,\s*b\s*)?\)\s*\{([^}]*)\}");
        let methods: Vec<(String, String)> = method_re
            .captures_iter(helper_body)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect();

        let mut ops = Vec::with_capacity(calls.len());
        for (obj, method, arg) in calls {
            if obj != helper_name {
                return Err(ExtractError::Decipher(format!(
                    "unexpected helper object {}",
                    obj
                )));
            }
            let body = methods
                .iter()
                .find(|(name, _)| *name == method)
                .map(|(_, body)| body.as_str())
                .ok_or_else(|| ExtractError::Decipher(format!("helper method {} not found", method)))?;

            let op = if body.contains("reverse") {
                CipherOp::Reverse
            } else if body.contains("splice") {
                CipherOp::Splice(arg)
            } else if body.contains("a[0]") {
                CipherOp::Swap(arg)
            } else {
                return Err(ExtractError::Decipher(format!(
                    "unrecognized helper method body: {}",
                    body
                )));
            };
            ops.push(op);
        }

        Ok(Self { ops })
    }

    /// Apply the transform to a scrambled signature.
    pub fn apply(&self, signature: &str) -> String {
        let mut chars: Vec<char> = signature.chars().collect();
        for op in &self.ops {
            match *op {
                CipherOp::Reverse => chars.reverse(),
                CipherOp::Splice(n) => {
                    let n = n.min(chars.len());
                    chars.drain(..n);
                }
                CipherOp::Swap(n) => {
                    if !chars.is_empty() {
                        let len = chars.len();
                        chars.swap(0, n % len);
                    }
                }
            }
        }
        chars.into_iter().collect()
    }

    /// Turn a form-encoded `signatureCipher` into a playable URL.
    pub fn decipher_url(&self, signature_cipher: &str) -> Result<String> {
        let mut signature = None;
        let mut param = None;
        let mut base = None;
        for (key, value) in url::form_urlencoded::parse(signature_cipher.as_bytes()) {
            match key.as_ref() {
                "s" => signature = Some(value.into_owned()),
                "sp" => param = Some(value.into_owned()),
                "url" => base = Some(value.into_owned()),
                _ => {}
            }
        }

        let signature =
            signature.ok_or_else(|| ExtractError::Decipher("cipher has no signature".to_string()))?;
        let base = base.ok_or_else(|| ExtractError::Decipher("cipher has no url".to_string()))?;
        let param = param.unwrap_or_else(|| "signature".to_string());

        let mut url = url::Url::parse(&base)
            .map_err(|e| ExtractError::Decipher(format!("bad stream URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair(&param, &self.apply(&signature));
        Ok(url.into())
    }
}
