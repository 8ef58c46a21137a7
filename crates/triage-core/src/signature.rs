//! Webhook signature verification.
//!
//! The messaging provider signs every webhook with an HMAC-SHA1 over the
//! public URL of the endpoint followed by each POST parameter (`key` then
//! `value`), parameters sorted by key. The base64 digest arrives in the
//! `X-Twilio-Signature` header.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the provider-computed signature.
pub const SIGNATURE_HEADER: &str = "x-twilio-signature";

/// Decoded form parameters, ordered by key.
///
/// A key that appears more than once keeps its first value; later values are
/// dropped both for signing and for field lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams(BTreeMap<String, String>);

impl FormParams {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn parse(body: &[u8]) -> Self {
        form_urlencoded::parse(body).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BTreeMap::new();
        for (key, value) in iter {
            map.entry(key.into()).or_insert_with(|| value.into());
        }
        Self(map)
    }
}

/// The string the provider signs: the URL followed by every `key` + `value`.
pub fn canonical_string(url: &str, params: &FormParams) -> String {
    let mut data = String::from(url);
    for (key, value) in params.iter() {
        data.push_str(key);
        data.push_str(value);
    }
    data
}

/// Compute the base64 signature the provider would send for this request.
///
/// Returns `None` for an empty auth token, which can never authenticate.
pub fn compute_signature(url: &str, params: &FormParams, auth_token: &str) -> Option<String> {
    let mac = keyed_mac(url, params, auth_token)?;
    Some(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check a provider signature.
///
/// Never errors: an empty token, an empty or non-base64 signature, a digest
/// of the wrong length and a plain mismatch all yield `false`. The digest
/// comparison is constant time.
pub fn verify(signature: &str, url: &str, params: &FormParams, auth_token: &str) -> bool {
    if signature.is_empty() {
        return false;
    }
    let Ok(provided) = BASE64_STANDARD.decode(signature) else {
        return false;
    };
    let Some(mac) = keyed_mac(url, params, auth_token) else {
        return false;
    };
    mac.verify_slice(&provided).is_ok()
}

fn keyed_mac(url: &str, params: &FormParams, auth_token: &str) -> Option<HmacSha1> {
    if auth_token.is_empty() {
        return None;
    }
    let mut mac = HmacSha1::new_from_slice(auth_token.as_bytes()).ok()?;
    mac.update(canonical_string(url, params).as_bytes());
    Some(mac)
}
