use std::fmt;
use num_enum::FromPrimitive;
use serde::{Serialize, Deserialize};

/// The state of a trade offer.
///
/// Steam occasionally introduces states before they are documented. Values without a known
/// variant are kept as [`TradeOfferState::Unknown`] rather than failing the whole response.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, FromPrimitive, Clone, Copy)]
#[serde(from = "u8", into = "u8")]
#[repr(u8)]
pub enum TradeOfferState {
    /// No state.
    None = 0,
    /// Invalid.
    Invalid = 1,
    /// This trade offer has been sent, neither party has acted on it yet.
    Active = 2,
    /// The trade offer was accepted by the recipient and items were exchanged.
    Accepted = 3,
    /// The recipient made a counter offer.
    Countered = 4,
    /// The trade offer was not accepted before the expiration date.
    Expired = 5,
    /// The sender cancelled the offer.
    Canceled = 6,
    /// The recipient declined the offer.
    Declined = 7,
    /// Some of the items in the offer are no longer available (indicated by the missing flag in
    /// the output).
    InvalidItems = 8,
    /// The offer hasn't been sent yet and is awaiting email/mobile confirmation.
    CreatedNeedsConfirmation = 9,
    /// Either party canceled the offer via email/mobile confirmation.
    CanceledBySecondFactor = 10,
    /// The trade has been placed on hold.
    InEscrow = 11,
    /// A state with no known meaning.
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl TradeOfferState {
    /// The human-readable name of this state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Invalid => "Invalid",
            Self::Active => "Active",
            Self::Accepted => "Accepted",
            Self::Countered => "Countered",
            Self::Expired => "Expired",
            Self::Canceled => "Canceled",
            Self::Declined => "Declined",
            Self::InvalidItems => "InvalidItems",
            Self::CreatedNeedsConfirmation => "CreatedNeedsConfirmation",
            Self::CanceledBySecondFactor => "CanceledByTwoFactor",
            Self::InEscrow => "InEscrow",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<TradeOfferState> for u8 {
    fn from(state: TradeOfferState) -> Self {
        match state {
            TradeOfferState::None => 0,
            TradeOfferState::Invalid => 1,
            TradeOfferState::Active => 2,
            TradeOfferState::Accepted => 3,
            TradeOfferState::Countered => 4,
            TradeOfferState::Expired => 5,
            TradeOfferState::Canceled => 6,
            TradeOfferState::Declined => 7,
            TradeOfferState::InvalidItems => 8,
            TradeOfferState::CreatedNeedsConfirmation => 9,
            TradeOfferState::CanceledBySecondFactor => 10,
            TradeOfferState::InEscrow => 11,
            TradeOfferState::Unknown(value) => value,
        }
    }
}

impl fmt::Display for TradeOfferState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unknown(value) => write!(f, "Unknown({value})"),
            state => f.write_str(state.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_state_names() {
        assert_eq!(TradeOfferState::Active.to_string(), "Active");
        assert_eq!(TradeOfferState::Expired.to_string(), "Expired");
        assert_eq!(TradeOfferState::CanceledBySecondFactor.to_string(), "CanceledByTwoFactor");
        assert_eq!(TradeOfferState::Unknown(42).to_string(), "Unknown(42)");
    }

    #[test]
    fn deserializes_unknown_states_without_failing() {
        let states: Vec<TradeOfferState> = serde_json::from_str("[0, 2, 11, 42]").unwrap();

        assert_eq!(states, vec![
            TradeOfferState::None,
            TradeOfferState::Active,
            TradeOfferState::InEscrow,
            TradeOfferState::Unknown(42),
        ]);
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&TradeOfferState::Unknown(42)).unwrap();

        assert_eq!(json, "42");
        assert_eq!(u8::from(TradeOfferState::Declined), 7);
    }
}
