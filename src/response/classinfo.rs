use crate::types::{AppId, ClassId, InstanceId};
use crate::serialize;
use serde::{Serialize, Deserialize};

/// Contains details about an item including names and descriptions.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ClassInfo {
    /// The item's app ID. This is included when including descriptions in the `GetTradeOffers`
    /// response.
    #[serde(default)]
    pub appid: Option<AppId>,
    /// The ID for this classinfo.
    #[serde(with = "serialize::string")]
    pub classid: ClassId,
    /// The specific instance ID for this classinfo.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(with = "serialize::option_string_0_as_none")]
    pub instanceid: InstanceId,
    /// The name of the item.
    pub name: String,
    /// The name of the item on the Steam Community Market.
    #[serde(default)]
    pub market_name: String,
    /// The market hash name. This is used to link to the item on the Steam Community Market.
    #[serde(default)]
    pub market_hash_name: String,
    /// The color of the item's name.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_color: Option<String>,
    /// The background color for the item.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// The URL to the icon for the item.
    #[serde(default)]
    pub icon_url: String,
    /// The item's type. This is displayed underneath the name of the game in inventories.
    #[serde(default)]
    #[serde(rename = "type")]
    pub r#type: String,
    /// Whether this item can be traded or not.
    #[serde(default)]
    #[serde(deserialize_with = "serialize::into_bool")]
    pub tradable: bool,
    /// Whether this item is marketable or not.
    #[serde(default)]
    #[serde(deserialize_with = "serialize::into_bool")]
    pub marketable: bool,
    /// Whether this item is a commodity item on the Steam Community Market.
    #[serde(default)]
    #[serde(deserialize_with = "serialize::into_bool")]
    pub commodity: bool,
    /// Descriptions for this item.
    #[serde(default)]
    pub descriptions: Vec<Description>,
    /// Tags for this item.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A color.
pub type Color = String;

/// A description.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Description {
    /// The description message.
    pub value: String,
    /// A string representing the color e.g. `"FFFFFF"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A tag.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Tag {
    /// The game's internal name of this tag.
    pub internal_name: String,
    /// The name of this tag. This value has the alias of `localized_tag_name`.
    #[serde(alias = "localized_tag_name")]
    pub name: String,
    /// The category of this tag.
    pub category: String,
    /// The color associated with this tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// The category name of this tag. This value has the alias of `localized_category_name`.
    #[serde(alias = "localized_category_name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}
