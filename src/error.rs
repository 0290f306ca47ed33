//! Error types.

/// Result with [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Any range of errors encountered when making requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An unexpected response containing a message was received.
    #[error("Unexpected response: {}", .0)]
    Response(String),
    /// An error was encountered making a request.
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    /// An error was encountered within the request middleware.
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    /// An error was encountered parsing a JSON response body.
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    /// An error was encountered on response. This is a response with an HTTP code other than 200.
    #[error("Error {}", .0)]
    Http(reqwest::StatusCode),
    /// A base URL could not be parsed.
    #[error("Invalid URL: {}", .0)]
    Url(#[from] url::ParseError),
    /// You are not logged in.
    #[error("Not logged in")]
    NotLoggedIn,
    /// An error was encountered parsing an HTML document.
    #[error("Error parsing HTML document: {}", .0)]
    ParseHtml(#[from] ParseHtmlError),
    /// An error was encountered when sending or acting on trade offers.
    #[error("Trade error: {}", .0)]
    TradeOffer(TradeOfferError),
    /// An error was encountered logging in.
    #[error("Login error: {}", .0)]
    Login(#[from] LoginError),
    /// An error was encountered generating a two-factor code.
    #[error("Error generating two-factor code: {}", .0)]
    Totp(#[from] another_steam_totp::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

impl From<TradeOfferError> for Error {
    fn from(error: TradeOfferError) -> Error {
        Error::TradeOffer(error)
    }
}

/// An error received from a response when sending or acting on trade offers.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum TradeOfferError {
    /// An unknown error occurred. The message is preserved.
    #[error("{}", .0)]
    Unknown(String),
    /// An EResult code without a known meaning for trade offers.
    #[error("Unknown EResult {}", .0)]
    UnknownEResult(i32),
    /// Generic failure.
    #[error("Fail")]
    Fail,
    /// The offer is no longer active or the items are no longer available.
    #[error("InvalidState")]
    InvalidState,
    /// You are not allowed to act on this offer.
    #[error("AccessDenied")]
    AccessDenied,
    /// The request timed out on Steam's end. The action may still have gone through.
    #[error("Timeout")]
    Timeout,
    /// Steam is down or unavailable.
    #[error("ServiceUnavailable")]
    ServiceUnavailable,
    /// A trade limit was hit.
    #[error("LimitExceeded")]
    LimitExceeded,
    /// The item was revoked.
    #[error("Revoked")]
    Revoked,
    /// The offer was already accepted or acted on.
    #[error("AlreadyRedeemed")]
    AlreadyRedeemed,
}

impl TradeOfferError {
    /// Maps an EResult code into a [`TradeOfferError`].
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::Fail,
            11 => Self::InvalidState,
            15 => Self::AccessDenied,
            16 => Self::Timeout,
            20 => Self::ServiceUnavailable,
            25 => Self::LimitExceeded,
            26 => Self::Revoked,
            28 => Self::AlreadyRedeemed,
            _ => Self::UnknownEResult(code),
        }
    }

    /// The EResult code for this error, if one is known.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Fail => Some(2),
            Self::InvalidState => Some(11),
            Self::AccessDenied => Some(15),
            Self::Timeout => Some(16),
            Self::ServiceUnavailable => Some(20),
            Self::LimitExceeded => Some(25),
            Self::Revoked => Some(26),
            Self::AlreadyRedeemed => Some(28),
            Self::UnknownEResult(code) => Some(*code),
            Self::Unknown(_) => None,
        }
    }
}

impl From<&str> for TradeOfferError {
    /// Steam error messages end with the EResult in parenthesis e.g. "... later. (28)".
    fn from(message: &str) -> Self {
        if let Some(code) = message.trim().split(' ').next_back() {
            let mut chars = code.chars();

            if chars.next() != Some('(') {
                return Self::Unknown(message.into());
            }

            if chars.next_back() != Some(')') {
                return Self::Unknown(message.into());
            }

            if let Ok(code) = chars.as_str().parse::<i32>() {
                return Self::from_code(code);
            }
        }

        Self::Unknown(message.into())
    }
}

/// An error encountered while logging in.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum LoginError {
    /// Steam responded with a non-OK EResult. 5 is an invalid password, 84 is rate limiting.
    #[error("Steam responded with EResult {}", .0)]
    EResult(i32),
    /// The login requires a confirmation we cannot provide (e.g. an email code).
    #[error("Unsupported Steam Guard confirmation: {}", .0)]
    UnsupportedConfirmation(i32),
    /// Steam asked for a two-factor code but no shared secret was given.
    #[error("A two-factor code is required but no shared secret was given")]
    MissingSharedSecret,
    /// The RSA key given by Steam could not be used.
    #[error("Invalid RSA key: {}", .0)]
    InvalidKey(String),
    /// Steam never issued an access token while polling the auth session.
    #[error("Timed out waiting for the auth session to complete")]
    PollTimedOut,
}

/// An error occurred when parsing HTML.
#[derive(thiserror::Error, Debug)]
pub enum ParseHtmlError {
    /// The HTML is not what is expected.
    #[error("{}", .0)]
    Malformed(&'static str),
    /// A selector could not be parsed.
    #[error("Error parsing selector")]
    ParseSelector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trade_offer_error() {
        let message = "There was an error accepting this trade offer. Please try again later. (28)";
        let error = TradeOfferError::from(message);

        assert_eq!(error, TradeOfferError::AlreadyRedeemed);
        assert_eq!(error.code(), Some(28));
    }

    #[test]
    fn keeps_message_when_no_code_is_present() {
        let message = "Something went wrong.";
        let error = TradeOfferError::from(message);

        assert_eq!(error, TradeOfferError::Unknown(message.into()));
        assert_eq!(error.code(), None);
    }

    #[test]
    fn maps_unknown_codes() {
        assert_eq!(TradeOfferError::from("Oops (99)"), TradeOfferError::UnknownEResult(99));
    }
}
