use crate::error::{Error, ParseHtmlError};
use crate::types::TradeOfferId;
use scraper::{Html, Selector};
use url::Url;

pub const COULD_NOT_GET_KEY: &str = "API key could not be parsed from response";
pub const NO_API_KEY: &str = "This account does not have an API key";

/// Parses the API key out of the `/dev/apikey` page.
pub fn parse_api_key(text: &str) -> Result<String, Error> {
    let fragment = Html::parse_document(text);
    let main_selector = Selector::parse("#mainContents h2")
        .map_err(|_error| ParseHtmlError::ParseSelector)?;
    let body_contents_selector = Selector::parse("#bodyContents_ex")
        .map_err(|_error| ParseHtmlError::ParseSelector)?;
    let h2_selector = Selector::parse("h2")
        .map_err(|_error| ParseHtmlError::ParseSelector)?;
    let p_selector = Selector::parse("p")
        .map_err(|_error| ParseHtmlError::ParseSelector)?;

    if let Some(element) = fragment.select(&main_selector).next() {
        if element.text().collect::<String>().trim() == "Access Denied" {
            return Err(Error::NotLoggedIn);
        }
    }

    if let Some(body_contents_element) = fragment.select(&body_contents_selector).next() {
        if let Some(element) = body_contents_element.select(&h2_selector).next() {
            if element.text().collect::<String>().trim() == "Your Steam Web API Key" {
                if let Some(element) = body_contents_element.select(&p_selector).next() {
                    let text = element.text().collect::<String>();
                    let mut text = text.trim().split(' ');

                    // "Key: XXXX"
                    text.next();

                    return match text.next() {
                        Some(api_key) if !api_key.is_empty() => Ok(api_key.to_string()),
                        _ => Err(Error::ParseHtml(ParseHtmlError::Malformed(COULD_NOT_GET_KEY))),
                    };
                }
            }
        }
    }

    Err(Error::ParseHtml(ParseHtmlError::Malformed(NO_API_KEY)))
}

/// Whether the error from [`parse_api_key`] means the account has no key registered.
pub fn is_missing_api_key(error: &Error) -> bool {
    matches!(error, Error::ParseHtml(ParseHtmlError::Malformed(message)) if *message == NO_API_KEY)
}

/// Joins `pathname` onto a base URL such as `https://steamcommunity.com`.
pub fn join_url(base: &Url, pathname: &str) -> String {
    format!("{}{pathname}", base.as_str().trim_end_matches('/'))
}

/// The URL of a Web API method.
pub fn api_method_url(
    base: &Url,
    interface: &str,
    method: &str,
    version: usize,
) -> String {
    join_url(base, &format!("/{interface}/{method}/v{version}/"))
}

/// The URL of a trade offer's page. Used as the referer when acting on the offer.
pub fn offer_url(base: &Url, tradeofferid: TradeOfferId) -> String {
    join_url(base, &format!("/tradeoffer/{tradeofferid}/"))
}
