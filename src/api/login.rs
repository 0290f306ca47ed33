//! Logging in with a password through Steam's authentication service.
//!
//! The password is encrypted with the RSA key Steam hands out for the account, a two-factor code
//! is submitted when Steam asks for one, and the session is polled until an access token is
//! issued.

use super::helpers::api_method_url;
use super::response::ApiResponse;
use crate::error::{Error, LoginError, Result};
use crate::helpers::{generate_sessionid, parses_response};
use crate::request::Credentials;
use crate::serialize::{string_or_number, as_string};
use crate::session::Session;
use crate::types::HttpClient;
use std::time::Duration;
use another_steam_totp::generate_auth_code;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use num_enum::FromPrimitive;
use rsa::{BigUint, Pkcs1v15Encrypt, RsaPublicKey};
use rsa::rand_core::OsRng;
use serde::{Deserialize, Serialize};
use serde::de::IgnoredAny;
use url::Url;

const INTERFACE: &str = "IAuthenticationService";
/// Steam returns the EResult of authentication calls in this header.
const ERESULT_HEADER: &str = "x-eresult";
const ERESULT_OK: i32 = 1;
/// EAuthTokenPlatformType::MobileApp. Tokens for this platform can be used directly as the
/// `steamLoginSecure` cookie.
const PLATFORM_TYPE_MOBILE_APP: u32 = 3;

/// EAuthSessionGuardType.
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
#[repr(i32)]
pub enum GuardType {
    #[num_enum(default)]
    Unknown = 0,
    None = 1,
    EmailCode = 2,
    DeviceCode = 3,
    DeviceConfirmation = 4,
    EmailConfirmation = 5,
    MachineToken = 6,
}

#[derive(Deserialize, Debug)]
pub struct RsaKey {
    pub publickey_mod: String,
    pub publickey_exp: String,
    #[serde(deserialize_with = "string_or_number")]
    pub timestamp: u64,
}

#[derive(Deserialize, Debug)]
struct AllowedConfirmation {
    confirmation_type: i32,
}

#[derive(Deserialize, Debug)]
pub struct BeginAuthSession {
    #[serde(deserialize_with = "string_or_number")]
    pub client_id: u64,
    pub request_id: String,
    #[serde(default)]
    pub interval: f32,
    #[serde(default)]
    allowed_confirmations: Vec<AllowedConfirmation>,
    #[serde(deserialize_with = "string_or_number")]
    pub steamid: u64,
}

impl BeginAuthSession {
    /// The guard confirmations Steam will accept for this session.
    pub fn guard_types(&self) -> Vec<GuardType> {
        self.allowed_confirmations
            .iter()
            .map(|confirmation| GuardType::from_primitive(confirmation.confirmation_type))
            .collect()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct AuthSessionStatus {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// How the auth session is polled while waiting for an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolling {
    /// Polls made before giving up.
    pub max_attempts: u32,
    /// Lower bound on the wait between polls. Steam's suggested interval is used when longer.
    pub min_interval: Duration,
}

impl Default for AuthPolling {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            min_interval: Duration::from_secs(1),
        }
    }
}

/// Which guard action to take for a new auth session.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GuardAction {
    /// Nothing needs to be submitted.
    Nothing,
    /// A two-factor code needs to be submitted.
    SubmitDeviceCode,
}

/// Picks the guard action for the confirmations Steam allows. Device codes are preferred since
/// they can be generated from the shared secret.
pub fn guard_action(guard_types: &[GuardType]) -> std::result::Result<GuardAction, LoginError> {
    if guard_types.is_empty() || guard_types.contains(&GuardType::None) {
        return Ok(GuardAction::Nothing);
    }

    if guard_types.contains(&GuardType::DeviceCode) {
        return Ok(GuardAction::SubmitDeviceCode);
    }

    let guard_type = guard_types[0];

    Err(LoginError::UnsupportedConfirmation(guard_type as i32))
}

/// Encrypts the password with Steam's RSA key for the account and encodes it as base64.
pub fn encrypt_password(
    password: &str,
    key: &RsaKey,
) -> std::result::Result<String, LoginError> {
    let modulus = BigUint::parse_bytes(key.publickey_mod.as_bytes(), 16)
        .ok_or_else(|| LoginError::InvalidKey("modulus is not hexadecimal".into()))?;
    let exponent = BigUint::parse_bytes(key.publickey_exp.as_bytes(), 16)
        .ok_or_else(|| LoginError::InvalidKey("exponent is not hexadecimal".into()))?;
    let public_key = RsaPublicKey::new(modulus, exponent)
        .map_err(|error| LoginError::InvalidKey(error.to_string()))?;
    let encrypted = public_key.encrypt(&mut OsRng, Pkcs1v15Encrypt, password.as_bytes())
        .map_err(|error| LoginError::InvalidKey(error.to_string()))?;

    Ok(STANDARD.encode(encrypted))
}

/// Fails when Steam reports a non-OK EResult for the call. A missing header is treated as OK.
pub fn check_eresult(
    headers: &reqwest::header::HeaderMap,
) -> std::result::Result<(), LoginError> {
    let eresult = headers
        .get(ERESULT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i32>().ok());

    match eresult {
        Some(ERESULT_OK) | None => Ok(()),
        Some(code) => Err(LoginError::EResult(code)),
    }
}

async fn send_form<T, D>(
    client: &HttpClient,
    api_url: &Url,
    method: &str,
    form: &T,
) -> Result<D>
where
    T: Serialize + ?Sized,
    D: serde::de::DeserializeOwned,
{
    let uri = api_method_url(api_url, INTERFACE, method, 1);
    let response = client.post(&uri)
        .form(form)
        .send()
        .await?;

    check_eresult(response.headers())?;

    let body: ApiResponse<D> = parses_response(response).await?;

    Ok(body.response)
}

async fn get_rsa_key(
    client: &HttpClient,
    api_url: &Url,
    account_name: &str,
) -> Result<RsaKey> {
    #[derive(Serialize)]
    struct Query<'a> {
        account_name: &'a str,
    }

    let uri = api_method_url(api_url, INTERFACE, "GetPasswordRSAPublicKey", 1);
    let response = client.get(&uri)
        .query(&Query {
            account_name,
        })
        .send()
        .await?;

    check_eresult(response.headers())?;

    let body: ApiResponse<RsaKey> = parses_response(response).await?;

    Ok(body.response)
}

async fn begin_auth_session(
    client: &HttpClient,
    api_url: &Url,
    credentials: &Credentials,
    key: &RsaKey,
) -> Result<BeginAuthSession> {
    #[derive(Serialize)]
    struct Form<'a> {
        account_name: &'a str,
        encrypted_password: String,
        #[serde(serialize_with = "as_string")]
        encryption_timestamp: u64,
        remember_login: bool,
        platform_type: u32,
        persistence: u32,
        website_id: &'static str,
        device_friendly_name: &'static str,
    }

    let encrypted_password = encrypt_password(&credentials.password, key)?;

    send_form(client, api_url, "BeginAuthSessionViaCredentials", &Form {
        account_name: &credentials.username,
        encrypted_password,
        encryption_timestamp: key.timestamp,
        remember_login: true,
        platform_type: PLATFORM_TYPE_MOBILE_APP,
        persistence: 1,
        website_id: "Mobile",
        device_friendly_name: "steam-tradeoffer-poller",
    }).await
}

async fn submit_device_code(
    client: &HttpClient,
    api_url: &Url,
    auth_session: &BeginAuthSession,
    code: &str,
) -> Result<()> {
    #[derive(Serialize)]
    struct Form<'a> {
        #[serde(serialize_with = "as_string")]
        client_id: u64,
        #[serde(serialize_with = "as_string")]
        steamid: u64,
        code: &'a str,
        code_type: i32,
    }

    let _: IgnoredAny = send_form(client, api_url, "UpdateAuthSessionWithSteamGuardCode", &Form {
        client_id: auth_session.client_id,
        steamid: auth_session.steamid,
        code,
        code_type: GuardType::DeviceCode as i32,
    }).await?;

    Ok(())
}

async fn poll_auth_session(
    client: &HttpClient,
    api_url: &Url,
    auth_session: &BeginAuthSession,
    polling: AuthPolling,
) -> Result<String> {
    #[derive(Serialize)]
    struct Form<'a> {
        #[serde(serialize_with = "as_string")]
        client_id: u64,
        request_id: &'a str,
    }

    let interval = Duration::from_secs_f32(auth_session.interval.clamp(0.0, 10.0))
        .max(polling.min_interval);

    for attempt in 1..=polling.max_attempts {
        let status: AuthSessionStatus = send_form(client, api_url, "PollAuthSessionStatus", &Form {
            client_id: auth_session.client_id,
            request_id: &auth_session.request_id,
        }).await?;

        if let Some(access_token) = status.access_token.filter(|token| !token.is_empty()) {
            return Ok(access_token);
        }

        log::debug!("Auth session not complete after attempt {attempt}");

        if attempt < polling.max_attempts {
            tokio::time::sleep(interval).await;
        }
    }

    Err(LoginError::PollTimedOut.into())
}

/// Logs in and returns the resulting session. `api_url` is the base URL of the Web API.
pub async fn login(
    client: &HttpClient,
    api_url: &Url,
    credentials: &Credentials,
    time_offset: i64,
    polling: AuthPolling,
) -> Result<Session> {
    let key = get_rsa_key(client, api_url, &credentials.username).await?;
    let auth_session = begin_auth_session(client, api_url, credentials, &key).await?;

    match guard_action(&auth_session.guard_types())? {
        GuardAction::Nothing => {},
        GuardAction::SubmitDeviceCode => {
            if credentials.shared_secret.is_empty() {
                return Err(Error::Login(LoginError::MissingSharedSecret));
            }

            let code = generate_auth_code(credentials.shared_secret.as_str(), Some(time_offset))?;

            submit_device_code(client, api_url, &auth_session, &code).await?;
        },
    }

    let access_token = poll_auth_session(client, api_url, &auth_session, polling).await?;

    Ok(Session {
        sessionid: generate_sessionid(),
        access_token,
        steamid: auth_session.steamid,
    })
}
