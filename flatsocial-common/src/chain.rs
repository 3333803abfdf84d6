//! Decoded on-chain records as they come out of the codec layer.
//!
//! Option-wrapped fields are plain [`Option`]s and tagged variants are closed enums, so
//! the flatteners can match on them exhaustively.

use crate::model::AccountId;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{Display, Formatter},
};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct WhoAndWhen {
    pub account: AccountId,
    pub block: u32,
    pub time: u64,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub enum Content {
    #[default]
    None,
    Raw(Vec<u8>),
    #[serde(rename = "IPFS")]
    Ipfs(Vec<u8>),
    Hyper(Vec<u8>),
}

macro_rules! space_permissions {
    ($($permission:ident),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
        pub enum SpacePermission {
            $($permission,)+
        }

        impl SpacePermission {
            pub const ALL: &[SpacePermission] = &[$(SpacePermission::$permission,)+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SpacePermission::$permission => stringify!($permission),)+
                }
            }
        }
    };
}

space_permissions!(
    ManageRoles,
    RepresentSpaceInternally,
    RepresentSpaceExternally,
    UpdateSpace,
    CreateSubspaces,
    UpdateOwnSubspaces,
    DeleteOwnSubspaces,
    HideOwnSubspaces,
    UpdateAnySubspace,
    DeleteAnySubspace,
    HideAnySubspace,
    CreatePosts,
    UpdateOwnPosts,
    DeleteOwnPosts,
    HideOwnPosts,
    UpdateAnyPost,
    DeleteAnyPost,
    HideAnyPost,
    CreateComments,
    UpdateOwnComments,
    DeleteOwnComments,
    HideOwnComments,
    HideAnyComment,
    Upvote,
    Downvote,
    Share,
    OverrideSubspacePermissions,
    OverridePostPermissions,
    SuggestEntityStatus,
    UpdateEntityStatus,
    UpdateSpaceSettings,
);

impl Display for SpacePermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionRole {
    None,
    Everyone,
    Follower,
    SpaceOwner,
}

pub type SpacePermissionSet = BTreeSet<SpacePermission>;

pub type SpacePermissions = BTreeMap<PermissionRole, Option<SpacePermissionSet>>;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: u64,
    pub created: WhoAndWhen,
    pub updated: Option<WhoAndWhen>,
    pub edited: Option<bool>,
    pub owner: AccountId,
    pub parent_id: Option<u64>,
    pub handle: Option<Vec<u8>>,
    pub content: Content,
    pub hidden: bool,
    pub posts_count: u32,
    pub hidden_posts_count: u32,
    pub followers_count: u32,
    pub score: i32,
    pub permissions: Option<SpacePermissions>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub root_post_id: u64,
    pub parent_id: Option<u64>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub enum PostExtension {
    #[default]
    RegularPost,
    Comment(Comment),
    SharedPost(u64),
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub created: WhoAndWhen,
    pub updated: Option<WhoAndWhen>,
    pub edited: Option<bool>,
    pub owner: AccountId,
    pub extension: PostExtension,
    pub space_id: Option<u64>,
    pub content: Content,
    pub hidden: bool,
    pub replies_count: u32,
    pub hidden_replies_count: u32,
    pub shares_count: u32,
    pub upvotes_count: u32,
    pub downvotes_count: u32,
    pub score: i32,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Profile {
    pub created: WhoAndWhen,
    pub updated: Option<WhoAndWhen>,
    pub edited: Option<bool>,
    pub content: Content,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccount {
    pub followers_count: u32,
    pub following_accounts_count: u32,
    pub following_spaces_count: u32,
    pub reputation: u32,
    pub profile: Option<Profile>,
}

/// A social account together with the address it is stored under.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct SocialAccountWithId {
    pub id: AccountId,
    #[serde(flatten)]
    pub account: SocialAccount,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub enum ReactionKind {
    #[default]
    Upvote,
    Downvote,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Reaction {
    pub id: u64,
    pub created: WhoAndWhen,
    pub updated: Option<WhoAndWhen>,
    pub kind: ReactionKind,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub enum InnerValue {
    Account(AccountId),
    Space(u64),
    Post(u64),
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainMeta {
    pub created: WhoAndWhen,
    pub updated: Option<WhoAndWhen>,
    pub expires_at: u32,
    pub owner: AccountId,
    pub content: Content,
    pub inner_value: Option<InnerValue>,
    pub outer_value: Option<Vec<u8>>,
}

/// Metadata every content-bearing record exposes.
pub trait SuperCommonStruct {
    fn created(&self) -> &WhoAndWhen;
    fn updated(&self) -> Option<&WhoAndWhen>;
    fn edited(&self) -> Option<bool>;
    fn content(&self) -> &Content;
}

macro_rules! super_common_struct {
    ($($record:ty),+) => {
        $(
            impl SuperCommonStruct for $record {
                fn created(&self) -> &WhoAndWhen {
                    &self.created
                }

                fn updated(&self) -> Option<&WhoAndWhen> {
                    self.updated.as_ref()
                }

                fn edited(&self) -> Option<bool> {
                    self.edited
                }

                fn content(&self) -> &Content {
                    &self.content
                }
            }
        )+
    };
}

super_common_struct!(Space, Post, Profile);

/// Renders a byte payload the way the codec displays it: UTF-8 text when possible,
/// `0x`-prefixed hex otherwise.
#[must_use]
pub fn bytes_to_human(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => format!("0x{}", hex::encode(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use crate::chain::{SpacePermission, bytes_to_human};

    #[test]
    fn permission_names() {
        assert_eq!(SpacePermission::ALL.len(), 31);
        assert_eq!(SpacePermission::CreatePosts.to_string(), "CreatePosts");
        assert_eq!(
            serde_json::to_string(&SpacePermission::HideAnyComment).unwrap(),
            "\"HideAnyComment\""
        );
    }

    #[test]
    fn human_bytes() {
        assert_eq!(bytes_to_human(b"bafyrei"), "bafyrei");
        assert_eq!(bytes_to_human(&[0xff, 0x00, 0x10]), "0xff0010");
        assert_eq!(bytes_to_human(&[]), "");
    }
}
