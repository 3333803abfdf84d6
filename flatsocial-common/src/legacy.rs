//! Shapes of the previous schema generation and their conversion into current data.
//!
//! Legacy records predate the `edited` flag. They are mapped onto the current chain
//! records and then go through the regular flatteners, so there is only one flattening
//! path to maintain.

use crate::{
    chain::{self, Content, PostExtension, SocialAccountWithId, SpacePermissions, WhoAndWhen},
    content::{PostContent, ProfileContent, SpaceContent},
    flatten::{flatten_post_struct, flatten_profile_struct, flatten_space_struct},
    model::{
        AccountId, ModelError,
        data::{self, CommonData},
    },
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: u64,
    pub created: WhoAndWhen,
    pub updated: Option<WhoAndWhen>,
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

impl From<Space> for chain::Space {
    fn from(value: Space) -> Self {
        Self {
            id: value.id,
            created: value.created,
            updated: value.updated,
            edited: None,
            owner: value.owner,
            parent_id: value.parent_id,
            handle: value.handle,
            content: value.content,
            hidden: value.hidden,
            posts_count: value.posts_count,
            hidden_posts_count: value.hidden_posts_count,
            followers_count: value.followers_count,
            score: value.score,
            permissions: value.permissions,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub created: WhoAndWhen,
    pub updated: Option<WhoAndWhen>,
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

impl From<Post> for chain::Post {
    fn from(value: Post) -> Self {
        Self {
            id: value.id,
            created: value.created,
            updated: value.updated,
            edited: None,
            owner: value.owner,
            extension: value.extension,
            space_id: value.space_id,
            content: value.content,
            hidden: value.hidden,
            replies_count: value.replies_count,
            hidden_replies_count: value.hidden_replies_count,
            shares_count: value.shares_count,
            upvotes_count: value.upvotes_count,
            downvotes_count: value.downvotes_count,
            score: value.score,
        }
    }
}

/// A raw record paired with its raw document, as the previous generation served it.
#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct LegacyData<S, C> {
    #[serde(rename = "struct")]
    pub struct_: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<C>,
}

pub type SpaceData = LegacyData<Space, SpaceContent>;
pub type PostData = LegacyData<Post, PostContent>;
pub type ProfileData = LegacyData<SocialAccountWithId, ProfileContent>;

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct PostWithSomeDetails {
    pub post: PostData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Box<PostWithSomeDetails>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ProfileData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceData>,
}

pub type PostWithAllDetails = PostWithSomeDetails;

pub fn convert_to_new_space_data(old: SpaceData) -> Result<data::SpaceData, ModelError> {
    let struct_ = flatten_space_struct(&old.struct_.into())?;
    Ok(CommonData::new(struct_, old.content))
}

pub fn convert_to_new_space_data_array(
    old: Vec<SpaceData>,
) -> Result<Vec<data::SpaceData>, ModelError> {
    old.into_iter().map(convert_to_new_space_data).collect()
}

pub fn convert_to_new_post_data(old: PostData) -> Result<data::PostData, ModelError> {
    let struct_ = flatten_post_struct(&old.struct_.into())?;
    Ok(CommonData::new(struct_, old.content))
}

pub fn convert_to_new_post_data_array(
    old: Vec<PostData>,
) -> Result<Vec<data::PostData>, ModelError> {
    old.into_iter().map(convert_to_new_post_data).collect()
}

#[must_use]
pub fn convert_to_new_profile_data(old: ProfileData) -> data::ProfileData {
    CommonData::new(flatten_profile_struct(&old.struct_), old.content)
}

#[must_use]
pub fn convert_to_new_profile_data_array(old: Vec<ProfileData>) -> Vec<data::ProfileData> {
    old.into_iter().map(convert_to_new_profile_data).collect()
}

pub fn convert_to_new_post_with_some_details(
    old: PostWithSomeDetails,
) -> Result<data::PostWithSomeDetails, ModelError> {
    let PostWithSomeDetails {
        post,
        ext,
        owner,
        space,
    } = old;

    Ok(data::PostWithSomeDetails {
        ext: ext
            .map(|ext| convert_to_new_post_with_some_details(*ext).map(Box::new))
            .transpose()?,
        owner: owner.map(convert_to_new_profile_data),
        space: space.map(convert_to_new_space_data).transpose()?,
        ..data::PostWithSomeDetails::new(convert_to_new_post_data(post)?)
    })
}

pub fn convert_to_new_post_with_some_details_array(
    old: Vec<PostWithSomeDetails>,
) -> Result<Vec<data::PostWithSomeDetails>, ModelError> {
    old.into_iter()
        .map(convert_to_new_post_with_some_details)
        .collect()
}

pub fn convert_to_new_post_with_all_details(
    old: PostWithAllDetails,
) -> Result<data::PostWithAllDetails, ModelError> {
    convert_to_new_post_with_some_details(old)
}

pub fn convert_to_new_post_with_all_details_array(
    old: Vec<PostWithAllDetails>,
) -> Result<Vec<data::PostWithAllDetails>, ModelError> {
    convert_to_new_post_with_some_details_array(old)
}
