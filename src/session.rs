/// Session data obtained from logging in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// The session ID. Sent with every community form post.
    pub sessionid: String,
    /// The access token. Used for Web API requests and the community login cookie.
    pub access_token: String,
    /// The Steam ID of the user.
    pub steamid: u64,
}

impl Session {
    /// The value of the `steamLoginSecure` cookie for this session.
    pub fn login_secure_cookie(&self) -> String {
        format!("{}%7C%7C{}", self.steamid, self.access_token)
    }

    /// Cookies to add to the jar for community requests.
    pub fn cookies(&self) -> Vec<String> {
        vec![
            format!("sessionid={}", self.sessionid),
            format!("steamLoginSecure={}", self.login_secure_cookie()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_community_cookies() {
        let session = Session {
            sessionid: "abcdef".into(),
            access_token: "eyJ0eXAi".into(),
            steamid: 76561198000000000,
        };

        assert_eq!(session.cookies(), vec![
            "sessionid=abcdef".to_string(),
            "steamLoginSecure=76561198000000000%7C%7CeyJ0eXAi".to_string(),
        ]);
    }
}
