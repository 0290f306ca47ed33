use serde::{Serialize, Deserialize};
use crate::types::TradeId;
use crate::serialize::option_string;

/// Details from a trade offer acceptance.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AcceptedOffer {
    /// The trade ID. Not present if the offer still needs to be confirmed.
    #[serde(default)]
    #[serde(with = "option_string")]
    pub tradeid: Option<TradeId>,
    /// Whether the offer needs mobile confirmation.
    #[serde(default)]
    pub needs_mobile_confirmation: bool,
    /// Whether the offer needs email confirmation.
    #[serde(default)]
    pub needs_email_confirmation: bool,
    /// The domain of the email address the confirmation was sent to.
    #[serde(default)]
    pub email_domain: Option<String>,
}

impl AcceptedOffer {
    /// Whether the acceptance still has to be confirmed before items are exchanged.
    pub fn needs_confirmation(&self) -> bool {
        self.needs_mobile_confirmation || self.needs_email_confirmation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accepted_offer() {
        let accepted: AcceptedOffer = serde_json::from_str(r#"{"tradeid":"5678901234567890123"}"#).unwrap();

        assert_eq!(accepted.tradeid, Some(5678901234567890123));
        assert!(!accepted.needs_confirmation());
    }

    #[test]
    fn parses_offer_needing_confirmation() {
        let accepted: AcceptedOffer = serde_json::from_str(r#"{"needs_mobile_confirmation":true,"needs_email_confirmation":false,"email_domain":"gmail.com"}"#).unwrap();

        assert_eq!(accepted.tradeid, None);
        assert!(accepted.needs_confirmation());
    }
}
