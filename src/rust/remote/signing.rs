//! AWS Signature Version 4 request signing for the inference runtime.

use std::env;
use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::RemoteError;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNING_SERVICE: &str = "sagemaker";
const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Static access key credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
    /// `AWS_SESSION_TOKEN`. Returns `None` unless both keys are set.
    pub fn from_env() -> Option<Self> {
        let access_key_id = non_empty_var("AWS_ACCESS_KEY_ID")?;
        let secret_access_key = non_empty_var("AWS_SECRET_ACCESS_KEY")?;
        let credentials = Self::new(access_key_id, secret_access_key);
        Some(match non_empty_var("AWS_SESSION_TOKEN") {
            Some(token) => credentials.with_session_token(token),
            None => credentials,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Everything about a request that goes into its signature.
#[derive(Debug, Clone)]
pub struct SignatureInput<'a> {
    pub method: &'a str,
    /// Host header value, including a non-default port
    pub host: &'a str,
    /// Already percent-encoded path
    pub path: &'a str,
    /// Canonical query string, empty when there is none
    pub query: &'a str,
    pub content_type: &'a str,
    pub body: &'a [u8],
    pub region: &'a str,
    pub service: &'a str,
    pub timestamp: DateTime<Utc>,
}

/// Computes the headers that authenticate `input`: `x-amz-date`,
/// `authorization` and, for temporary credentials, `x-amz-security-token`.
pub fn sign_request(
    credentials: &Credentials,
    input: &SignatureInput<'_>,
) -> Result<Vec<(&'static str, String)>, RemoteError> {
    let amz_date = input.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date = input.timestamp.format("%Y%m%d").to_string();

    // Kept in lexical order of header name.
    let mut headers = vec![
        ("content-type", input.content_type.to_string()),
        ("host", input.host.to_string()),
        ("x-amz-date", amz_date.clone()),
    ];
    if let Some(token) = &credentials.session_token {
        headers.push(("x-amz-security-token", token.clone()));
    }

    let signed_headers = headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";");
    let request = canonical_request(input, &headers, &signed_headers);

    let scope = format!("{}/{}/{}/aws4_request", date, input.region, input.service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        hex_sha256(request.as_bytes())
    );

    let key = derive_signing_key(&credentials.secret_access_key, &date, input.region, input.service)?;
    let signature = to_hex(&hmac_sha256(&key, string_to_sign.as_bytes())?);

    let mut signed = vec![
        ("x-amz-date", amz_date),
        (
            "authorization",
            format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, credentials.access_key_id, scope, signed_headers, signature
            ),
        ),
    ];
    if let Some(token) = &credentials.session_token {
        signed.push(("x-amz-security-token", token.clone()));
    }
    Ok(signed)
}

fn canonical_request(input: &SignatureInput<'_>, headers: &[(&str, String)], signed_headers: &str) -> String {
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
        .collect();
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        input.method,
        input.path,
        input.query,
        canonical_headers,
        signed_headers,
        hex_sha256(input.body)
    )
}

/// Derives the per-day, per-region, per-service signing key.
pub fn derive_signing_key(secret: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>, RemoteError> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, RemoteError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| RemoteError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn iam_list_users(timestamp: DateTime<Utc>) -> SignatureInput<'static> {
        SignatureInput {
            method: "GET",
            host: "iam.amazonaws.com",
            path: "/",
            query: "Action=ListUsers&Version=2010-05-08",
            content_type: "application/x-www-form-urlencoded; charset=utf-8",
            body: b"",
            region: "us-east-1",
            service: "iam",
            timestamp,
        }
    }

    #[test]
    fn test_signing_key_matches_published_example() -> Result<(), RemoteError> {
        let key = derive_signing_key(EXAMPLE_SECRET, "20120215", "us-east-1", "iam")?;
        assert_eq!(
            to_hex(&key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
        Ok(())
    }

    #[test]
    fn test_signature_matches_published_example() -> Result<(), RemoteError> {
        let timestamp = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        let credentials = Credentials::new("AKIDEXAMPLE", EXAMPLE_SECRET);
        let headers = sign_request(&credentials, &iam_list_users(timestamp))?;

        assert_eq!(headers[0], ("x-amz-date", "20150830T123600Z".to_string()));
        assert_eq!(
            headers[1].1,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
        Ok(())
    }

    #[test]
    fn test_canonical_request_layout() {
        let timestamp = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        let input = iam_list_users(timestamp);
        let headers = vec![
            ("content-type", input.content_type.to_string()),
            ("host", input.host.to_string()),
            ("x-amz-date", "20150830T123600Z".to_string()),
        ];
        let request = canonical_request(&input, &headers, "content-type;host;x-amz-date");
        assert_eq!(
            request,
            "GET\n/\nAction=ListUsers&Version=2010-05-08\n\
             content-type:application/x-www-form-urlencoded; charset=utf-8\n\
             host:iam.amazonaws.com\n\
             x-amz-date:20150830T123600Z\n\n\
             content-type;host;x-amz-date\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_session_token_is_signed_and_sent() -> Result<(), RemoteError> {
        let timestamp = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let credentials = Credentials::new("AKIDEXAMPLE", EXAMPLE_SECRET).with_session_token("token");
        let headers = sign_request(&credentials, &iam_list_users(timestamp))?;

        assert_eq!(headers.len(), 3);
        assert_eq!(headers[2], ("x-amz-security-token", "token".to_string()));
        assert!(headers[1]
            .1
            .contains("SignedHeaders=content-type;host;x-amz-date;x-amz-security-token,"));
        Ok(())
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("AKIDEXAMPLE", EXAMPLE_SECRET).with_session_token("token");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("AKIDEXAMPLE"));
        assert!(!printed.contains(EXAMPLE_SECRET));
        assert!(!printed.contains("\"token\""));
    }
}
