use crate::error::{Error, TradeOfferError};
use std::sync::Arc;
use reqwest::{header, cookie::CookieStore};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use lazy_regex::{regex_is_match, regex_captures};

pub const COMMUNITY_HOSTNAME: &str = "steamcommunity.com";
pub const API_HOSTNAME: &str = "api.steampowered.com";
pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// Builds the default client: a cookie store, a browser user agent and no middleware. Requests
/// are never retried.
pub fn get_default_client<T>(
    cookie_store: Arc<T>,
    user_agent_string: &'static str,
) -> reqwest::Result<ClientWithMiddleware>
where
    T: CookieStore + 'static,
{
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));

    let client = reqwest::ClientBuilder::new()
        .cookie_provider(cookie_store)
        .default_headers(headers)
        .build()?;

    Ok(ClientBuilder::new(client).build())
}

/// Generates a random session ID for community requests.
pub fn generate_sessionid() -> String {
    rand::random::<[u8; 12]>()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
}

fn is_login(location_option: Option<&header::HeaderValue>) -> bool {
    match location_option {
        Some(location) => {
            if let Ok(location_str) = location.to_str() {
                regex_is_match!("/login", location_str)
            } else {
                false
            }
        },
        None => false,
    }
}

pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes, Error> {
    let status = &response.status();

    match status.as_u16() {
        300..=399 if is_login(response.headers().get(header::LOCATION)) => {
            Err(Error::NotLoggedIn)
        },
        400..=599 => {
            Err(Error::Http(*status))
        },
        _ => {
            Ok(response.bytes().await?)
        }
    }
}

/// Checks the response and parses the body as JSON. Known Steam error pages are converted into
/// their respective errors.
pub async fn parses_response<D>(response: reqwest::Response) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;

    parses_body(&body)
}

pub(crate) fn parses_body<D>(body: &[u8]) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    match serde_json::from_slice::<D>(body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(body);

            if regex_is_match!(r#"<h1>Sorry!</h1>"#, &html) {
                if let Some((_, message)) = regex_captures!("<h3>(.+)</h3>", &html) {
                    Err(Error::Response(message.into()))
                } else {
                    Err(Error::Response("Unexpected error".into()))
                }
            } else if regex_is_match!(r#"<h1>Sign In</h1>"#, &html) && regex_is_match!(r#"g_steamID = false;"#, &html) {
                Err(Error::NotLoggedIn)
            } else if let Some((_, message)) = regex_captures!(r#"<div id="error_msg">\s*([^<]+)\s*</div>"#, &html) {
                Err(Error::TradeOffer(TradeOfferError::from(message.trim())))
            } else if let Ok(body) = serde_json::from_slice::<ErrorResponse>(body) {
                Err(Error::TradeOffer(TradeOfferError::from(body.str_error.as_str())))
            } else {
                log::debug!("Unexpected response body: {html}");
                Err(Error::Parse(parse_error))
            }
        }
    }
}

/// Steam sends this as JSON for errors on trade offer actions.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(rename = "strError")]
    str_error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct Body {
        #[allow(dead_code)]
        success: bool,
    }

    #[test]
    fn generates_sessionid() {
        let sessionid = generate_sessionid();

        assert_eq!(sessionid.len(), 24);
        assert!(sessionid.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn parses_trade_error_json() {
        let body = br#"{"strError":"There was an error accepting this trade offer. Please try again later. (28)"}"#;
        let error = parses_body::<Body>(body).unwrap_err();

        assert!(matches!(error, Error::TradeOffer(TradeOfferError::AlreadyRedeemed)));
    }

    #[test]
    fn parses_sorry_page() {
        let body = b"<html><h1>Sorry!</h1><h3>An error was encountered while processing your request</h3></html>";
        let error = parses_body::<Body>(body).unwrap_err();

        assert!(matches!(error, Error::Response(message) if message == "An error was encountered while processing your request"));
    }

    #[test]
    fn parses_sign_in_page() {
        let body = b"<html><h1>Sign In</h1><script>g_steamID = false;</script></html>";
        let error = parses_body::<Body>(body).unwrap_err();

        assert!(matches!(error, Error::NotLoggedIn));
    }

    #[test]
    fn parses_error_msg_block() {
        let body = b"<div id=\"error_msg\">\n  This trade offer is no longer valid. (11)\n</div>";
        let error = parses_body::<Body>(body).unwrap_err();

        assert!(matches!(error, Error::TradeOffer(TradeOfferError::InvalidState)));
    }
}
