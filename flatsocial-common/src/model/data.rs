use crate::{
    content::{
        CommentContent, CommonContent, DerivedContent, PostContent, ProfileContent, SpaceContent,
        convert_to_derived_content,
    },
    model::{
        HasId, Id, ModelError, SpaceOrPost,
        post::{PostMarker, PostStruct},
        profile::ProfileStruct,
        reaction::ReactionStruct,
        space::SpaceStruct,
    },
};
use serde::{Deserialize, Serialize};

/// A flat struct together with its off-chain content, when that could be fetched.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(bound(
    serialize = "S: Serialize, S::Id: Serialize, C: Serialize",
    deserialize = "S: Deserialize<'de>, S::Id: Deserialize<'de>, C: Deserialize<'de>"
))]
pub struct CommonData<S: HasId, C> {
    pub id: S::Id,
    #[serde(rename = "struct")]
    pub struct_: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<DerivedContent<C>>,
}

impl<S: HasId, C: CommonContent> CommonData<S, C> {
    /// Merges the struct with its raw document, deriving the summary fields.
    #[must_use]
    pub fn new(struct_: S, content: Option<C>) -> Self {
        Self {
            id: struct_.id(),
            struct_,
            content: convert_to_derived_content(content),
        }
    }
}

pub type SpaceData = CommonData<SpaceStruct, SpaceContent>;
pub type PostData = CommonData<PostStruct, PostContent>;
pub type CommentData = CommonData<PostStruct, CommentContent>;
pub type ProfileData = CommonData<ProfileStruct, ProfileContent>;

pub fn as_comment_data(post_data: PostData) -> Result<CommentData, ModelError> {
    post_data.struct_.as_comment()?;
    Ok(post_data)
}

/// A space or post is unlisted when it is missing, hidden, or has no content.
#[must_use]
pub fn is_unlisted<S: SpaceOrPost, C>(data: Option<&CommonData<S, C>>) -> bool {
    data.is_none_or(|data| data.struct_.hidden() || data.content.is_none())
}

#[must_use]
pub fn is_public<S: SpaceOrPost, C>(data: Option<&CommonData<S, C>>) -> bool {
    !is_unlisted(data)
}

/// A post with the entities it refers to. `ext` holds the original of a shared post or
/// the root post of a comment.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct PostWithSomeDetails {
    pub id: Id<PostMarker>,
    pub post: PostData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Box<PostWithSomeDetails>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ProfileData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceData>,
}

/// Same shape as [`PostWithSomeDetails`], fetched with owner and space requested.
pub type PostWithAllDetails = PostWithSomeDetails;

impl PostWithSomeDetails {
    #[must_use]
    pub fn new(post: PostData) -> Self {
        Self {
            id: post.id,
            post,
            ext: None,
            owner: None,
            space: None,
        }
    }
}

/// Access to the flat struct inside bare structs and composite records alike.
pub trait HasStruct {
    type Struct;

    fn struct_ref(&self) -> &Self::Struct;
}

impl<S: HasId, C> HasStruct for CommonData<S, C> {
    type Struct = S;

    fn struct_ref(&self) -> &Self::Struct {
        &self.struct_
    }
}

impl HasStruct for PostWithSomeDetails {
    type Struct = PostStruct;

    fn struct_ref(&self) -> &Self::Struct {
        &self.post.struct_
    }
}

macro_rules! bare_struct {
    ($($struct:ty),+) => {
        $(
            impl HasStruct for $struct {
                type Struct = Self;

                fn struct_ref(&self) -> &Self::Struct {
                    self
                }
            }
        )+
    };
}

bare_struct!(SpaceStruct, PostStruct, ProfileStruct, ReactionStruct);
