use super::SteamSession;
use super::login::AuthPolling;
use crate::error::Result;
use crate::helpers::{get_default_client, USER_AGENT_STRING, COMMUNITY_HOSTNAME, API_HOSTNAME};
use std::sync::Arc;
use reqwest::cookie::Jar;
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

/// Builder for constructing a [`SteamSession`].
#[derive(Debug, Clone)]
pub struct SteamSessionBuilder {
    /// The language for item descriptions.
    pub(crate) language: String,
    /// Request cookies.
    pub(crate) cookies: Option<Arc<Jar>>,
    /// Client to use for requests. Remember to also include the cookies connected to this client.
    pub(crate) client: Option<ClientWithMiddleware>,
    /// User agent for requests.
    pub(crate) user_agent: &'static str,
    /// Base URL for community requests.
    pub(crate) community_url: String,
    /// Base URL for Web API requests.
    pub(crate) api_url: String,
}

impl Default for SteamSessionBuilder {
    fn default() -> Self {
        Self {
            language: String::from("english"),
            cookies: None,
            client: None,
            user_agent: USER_AGENT_STRING,
            community_url: format!("https://{COMMUNITY_HOSTNAME}"),
            api_url: format!("https://{API_HOSTNAME}"),
        }
    }
}

impl SteamSessionBuilder {
    /// Creates a new [`SteamSessionBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The language for item descriptions. An empty string uses the default of `english`.
    pub fn language<T>(mut self, language: T) -> Self
    where
        T: Into<String>,
    {
        let language = language.into();

        if !language.is_empty() {
            self.language = language;
        }

        self
    }

    /// Client to use for requests. It is also required to include the associated cookies with this
    /// client so that login cookies are sent with community requests.
    pub fn client(mut self, client: ClientWithMiddleware, cookies: Arc<Jar>) -> Self {
        self.client = Some(client);
        self.cookies = Some(cookies);
        self
    }

    /// The user agent for requests. Ignored if a client is given.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Base URL for community requests. Default is `https://steamcommunity.com`.
    pub fn community_url<T>(mut self, community_url: T) -> Self
    where
        T: Into<String>,
    {
        self.community_url = community_url.into();
        self
    }

    /// Base URL for Web API requests. Default is `https://api.steampowered.com`.
    pub fn api_url<T>(mut self, api_url: T) -> Self
    where
        T: Into<String>,
    {
        self.api_url = api_url.into();
        self
    }

    /// Builds the [`SteamSession`]. Fails if either base URL is invalid or the default HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<SteamSession> {
        let community_url = Url::parse(&self.community_url)?;
        let api_url = Url::parse(&self.api_url)?;
        let cookies = self.cookies
            .unwrap_or_default();
        let client = match self.client {
            Some(client) => client,
            None => get_default_client(Arc::clone(&cookies), self.user_agent)?,
        };

        Ok(SteamSession {
            client,
            cookies,
            language: self.language,
            community_url,
            api_url,
            auth_polling: AuthPolling::default(),
            session: None,
        })
    }
}
