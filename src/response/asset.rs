use super::ClassInfo;
use crate::types::{AppId, ContextId, AssetId, Amount, ClassId, InstanceId};
use std::sync::Arc;

/// An item in a trade offer.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// The app ID e.g. `440` for Team Fortress 2 or `730` for Counter-Strike 2.
    pub appid: AppId,
    /// The context ID.
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    pub assetid: AssetId,
    /// The class ID of the item.
    pub classid: ClassId,
    /// The instance ID of the item.
    pub instanceid: InstanceId,
    /// The amount. If this item is not stackable the amount will be `1`.
    pub amount: Amount,
    /// Whether the item is no longer available e.g. it was traded away.
    pub missing: bool,
    /// The description of the item. Only present when descriptions were requested and Steam
    /// included one for this item.
    pub classinfo: Option<Arc<ClassInfo>>,
}

impl Asset {
    /// The name of the item, if it has a description.
    pub fn name(&self) -> Option<&str> {
        self.classinfo.as_deref().map(|classinfo| classinfo.name.as_str())
    }
}
