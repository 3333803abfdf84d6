use crate::{
    chain::{PermissionRole, SpacePermission},
    model::{
        AccountId, CanHaveContent, ContentId, HasId, HasOwner, Id, SpaceOrPost,
        common::SpaceOrPostCommon,
    },
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct SpaceMarker;

/// Permissions granted to one role. Only granted permissions are present.
pub type SpacePermissionMap = BTreeMap<SpacePermission, bool>;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatSpacePermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub none_permissions: Option<SpacePermissionMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub everyone_permissions: Option<SpacePermissionMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_permissions: Option<SpacePermissionMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_owner_permissions: Option<SpacePermissionMap>,
}

impl FlatSpacePermissions {
    #[must_use]
    pub fn role(&self, role: PermissionRole) -> Option<&SpacePermissionMap> {
        match role {
            PermissionRole::None => self.none_permissions.as_ref(),
            PermissionRole::Everyone => self.everyone_permissions.as_ref(),
            PermissionRole::Follower => self.follower_permissions.as_ref(),
            PermissionRole::SpaceOwner => self.space_owner_permissions.as_ref(),
        }
    }

    pub fn set_role(&mut self, role: PermissionRole, permissions: SpacePermissionMap) {
        let slot = match role {
            PermissionRole::None => &mut self.none_permissions,
            PermissionRole::Everyone => &mut self.everyone_permissions,
            PermissionRole::Follower => &mut self.follower_permissions,
            PermissionRole::SpaceOwner => &mut self.space_owner_permissions,
        };
        *slot = Some(permissions);
    }

    #[must_use]
    pub fn is_granted(&self, role: PermissionRole, permission: SpacePermission) -> bool {
        self.role(role)
            .and_then(|permissions| permissions.get(&permission))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.none_permissions.is_none()
            && self.everyone_permissions.is_none()
            && self.follower_permissions.is_none()
            && self.space_owner_permissions.is_none()
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceStruct {
    #[serde(flatten)]
    pub base: SpaceOrPostCommon<SpaceMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id<SpaceMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(flatten)]
    pub permissions: FlatSpacePermissions,
    pub can_follower_create_posts: bool,
    pub can_everyone_create_posts: bool,

    pub posts_count: u32,
    pub hidden_posts_count: u32,
    pub visible_posts_count: u32,
    pub followers_count: u32,
    pub score: i32,
}

impl HasId for SpaceStruct {
    type Id = Id<SpaceMarker>;

    fn id(&self) -> Self::Id {
        self.base.id
    }
}

impl HasOwner for SpaceStruct {
    fn owner_id(&self) -> &AccountId {
        &self.base.owner_id
    }
}

impl CanHaveContent for SpaceStruct {
    fn content_id(&self) -> Option<&ContentId> {
        self.base.content_id()
    }
}

impl SpaceOrPost for SpaceStruct {
    fn hidden(&self) -> bool {
        self.base.hidden
    }
}
