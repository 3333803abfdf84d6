use crate::model::{AccountId, CanHaveContent, ContentId, HasId, HasOwner, Id};
use serde::{Deserialize, Serialize};
use time::{Duration, UtcDateTime};

/// Temporal and content metadata shared by every flattened entity.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFields {
    pub created_by_account: AccountId,
    pub created_at_block: u32,
    pub created_at_time: u64,

    /// Set when the record carries an `updated` entry.
    pub is_updated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_account: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at_block: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at_time: Option<u64>,

    /// The chain's own `edited` flag, absent on records that predate it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_edited: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<ContentId>,
}

impl CommonFields {
    #[must_use]
    pub fn created_at(&self) -> Option<UtcDateTime> {
        millis_to_date_time(self.created_at_time)
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<UtcDateTime> {
        self.updated_at_time.and_then(millis_to_date_time)
    }
}

fn millis_to_date_time(millis: u64) -> Option<UtcDateTime> {
    let millis = i64::try_from(millis).ok()?;
    UtcDateTime::UNIX_EPOCH.checked_add(Duration::milliseconds(millis))
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct SpaceOrPostCommon<Marker> {
    #[serde(flatten)]
    pub common: CommonFields,
    pub id: Id<Marker>,
    pub owner_id: AccountId,
    pub hidden: bool,
}

impl<Marker> HasId for SpaceOrPostCommon<Marker> {
    type Id = Id<Marker>;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl<Marker> HasOwner for SpaceOrPostCommon<Marker> {
    fn owner_id(&self) -> &AccountId {
        &self.owner_id
    }
}

impl<Marker> CanHaveContent for SpaceOrPostCommon<Marker> {
    fn content_id(&self) -> Option<&ContentId> {
        self.common.content_id.as_ref()
    }
}
