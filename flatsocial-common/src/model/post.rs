use crate::model::{
    AccountId, CanHaveContent, CanHaveSpaceId, ContentId, HasId, HasOwner, Id, ModelError,
    SpaceOrPost, common::SpaceOrPostCommon, space::SpaceMarker,
};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// What kind of post this is. Serialized as the `isRegularPost`, `isSharedPost` and
/// `isComment` flags next to the ids of the matching kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(try_from = "ExtensionFields", into = "ExtensionFields")]
pub enum FlatPostExtension {
    #[default]
    RegularPost,
    SharedPost {
        original_post_id: Id<PostMarker>,
    },
    Comment {
        root_post_id: Id<PostMarker>,
        /// Absent when replying to the root post directly.
        parent_id: Option<Id<PostMarker>>,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtensionFields {
    #[serde(default)]
    is_regular_post: bool,
    #[serde(default)]
    is_shared_post: bool,
    #[serde(default)]
    is_comment: bool,
    #[serde(default, alias = "sharedPostId", skip_serializing_if = "Option::is_none")]
    original_post_id: Option<Id<PostMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root_post_id: Option<Id<PostMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<Id<PostMarker>>,
}

impl From<FlatPostExtension> for ExtensionFields {
    fn from(value: FlatPostExtension) -> Self {
        match value {
            FlatPostExtension::RegularPost => Self {
                is_regular_post: true,
                ..Self::default()
            },
            FlatPostExtension::SharedPost { original_post_id } => Self {
                is_shared_post: true,
                original_post_id: Some(original_post_id),
                ..Self::default()
            },
            FlatPostExtension::Comment {
                root_post_id,
                parent_id,
            } => Self {
                is_comment: true,
                root_post_id: Some(root_post_id),
                parent_id,
                ..Self::default()
            },
        }
    }
}

impl TryFrom<ExtensionFields> for FlatPostExtension {
    type Error = ModelError;

    fn try_from(value: ExtensionFields) -> Result<Self, Self::Error> {
        match (value.is_regular_post, value.is_shared_post, value.is_comment) {
            (true, false, false) => Ok(Self::RegularPost),
            (false, true, false) => Ok(Self::SharedPost {
                original_post_id: value
                    .original_post_id
                    .ok_or(ModelError::MissingExtensionField("originalPostId"))?,
            }),
            (false, false, true) => Ok(Self::Comment {
                root_post_id: value
                    .root_post_id
                    .ok_or(ModelError::MissingExtensionField("rootPostId"))?,
                parent_id: value.parent_id,
            }),
            _ => Err(ModelError::AmbiguousPostExtension),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStruct {
    #[serde(flatten)]
    pub base: SpaceOrPostCommon<PostMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<Id<SpaceMarker>>,
    #[serde(flatten)]
    pub extension: FlatPostExtension,

    pub replies_count: u32,
    pub hidden_replies_count: u32,
    pub visible_replies_count: u32,
    pub shares_count: u32,
    pub upvotes_count: u32,
    pub downvotes_count: u32,
    pub score: i32,
}

impl PostStruct {
    #[must_use]
    pub fn is_regular_post(&self) -> bool {
        matches!(self.extension, FlatPostExtension::RegularPost)
    }

    #[must_use]
    pub fn is_shared_post(&self) -> bool {
        matches!(self.extension, FlatPostExtension::SharedPost { .. })
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self.extension, FlatPostExtension::Comment { .. })
    }

    /// The post another post refers to: the original of a share or the root of a comment.
    #[must_use]
    pub fn referenced_post_id(&self) -> Option<Id<PostMarker>> {
        match self.extension {
            FlatPostExtension::RegularPost => None,
            FlatPostExtension::SharedPost { original_post_id } => Some(original_post_id),
            FlatPostExtension::Comment { root_post_id, .. } => Some(root_post_id),
        }
    }

    pub fn as_shared_post(&self) -> Result<SharedPostStruct<'_>, ModelError> {
        match self.extension {
            FlatPostExtension::SharedPost { original_post_id } => Ok(SharedPostStruct {
                post: self,
                original_post_id,
            }),
            _ => Err(ModelError::NotASharedPost(self.base.id)),
        }
    }

    pub fn as_comment(&self) -> Result<CommentStruct<'_>, ModelError> {
        match self.extension {
            FlatPostExtension::Comment {
                root_post_id,
                parent_id,
            } => Ok(CommentStruct {
                post: self,
                root_post_id,
                parent_id,
            }),
            _ => Err(ModelError::NotAComment(self.base.id)),
        }
    }
}

pub fn as_shared_post_struct(post: &PostStruct) -> Result<SharedPostStruct<'_>, ModelError> {
    post.as_shared_post()
}

pub fn as_comment_struct(post: &PostStruct) -> Result<CommentStruct<'_>, ModelError> {
    post.as_comment()
}

/// A post known to be a share.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct SharedPostStruct<'a> {
    pub post: &'a PostStruct,
    pub original_post_id: Id<PostMarker>,
}

impl Deref for SharedPostStruct<'_> {
    type Target = PostStruct;

    fn deref(&self) -> &Self::Target {
        self.post
    }
}

/// A post known to be a comment.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct CommentStruct<'a> {
    pub post: &'a PostStruct,
    pub root_post_id: Id<PostMarker>,
    pub parent_id: Option<Id<PostMarker>>,
}

impl CommentStruct<'_> {
    /// The post this comment replies to directly.
    #[must_use]
    pub fn replied_to(&self) -> Id<PostMarker> {
        self.parent_id.unwrap_or(self.root_post_id)
    }
}

impl Deref for CommentStruct<'_> {
    type Target = PostStruct;

    fn deref(&self) -> &Self::Target {
        self.post
    }
}

impl HasId for PostStruct {
    type Id = Id<PostMarker>;

    fn id(&self) -> Self::Id {
        self.base.id
    }
}

impl HasOwner for PostStruct {
    fn owner_id(&self) -> &AccountId {
        &self.base.owner_id
    }
}

impl CanHaveContent for PostStruct {
    fn content_id(&self) -> Option<&ContentId> {
        self.base.content_id()
    }
}

impl CanHaveSpaceId for PostStruct {
    fn space_id(&self) -> Option<&Id<SpaceMarker>> {
        self.space_id.as_ref()
    }
}

impl SpaceOrPost for PostStruct {
    fn hidden(&self) -> bool {
        self.base.hidden
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        Id, ModelError,
        post::{FlatPostExtension, PostStruct, as_comment_struct, as_shared_post_struct},
    };
    use serde_json::json;

    fn post_with(extension: FlatPostExtension) -> PostStruct {
        let mut post = PostStruct {
            extension,
            ..PostStruct::default()
        };
        post.base.id = Id::new(7);
        post
    }

    #[test]
    fn narrowing_to_shared_post() {
        let shared = post_with(FlatPostExtension::SharedPost {
            original_post_id: Id::new(3),
        });
        let view = as_shared_post_struct(&shared).unwrap();
        assert_eq!(view.post, &shared);
        assert_eq!(view.original_post_id, Id::new(3));

        let comment = post_with(FlatPostExtension::Comment {
            root_post_id: Id::new(3),
            parent_id: None,
        });
        assert_eq!(
            as_shared_post_struct(&comment),
            Err(ModelError::NotASharedPost(Id::new(7)))
        );
    }

    #[test]
    fn narrowing_to_comment() {
        let comment = post_with(FlatPostExtension::Comment {
            root_post_id: Id::new(3),
            parent_id: Some(Id::new(5)),
        });
        let view = as_comment_struct(&comment).unwrap();
        assert_eq!(view.replied_to(), Id::new(5));
        assert_eq!(view.base.id, Id::new(7));

        let regular = post_with(FlatPostExtension::RegularPost);
        assert_eq!(
            regular.as_comment().unwrap_err(),
            ModelError::NotAComment(Id::new(7))
        );
    }

    #[test]
    fn exactly_one_kind_flag() {
        let extensions = [
            FlatPostExtension::RegularPost,
            FlatPostExtension::SharedPost {
                original_post_id: Id::new(1),
            },
            FlatPostExtension::Comment {
                root_post_id: Id::new(1),
                parent_id: None,
            },
        ];

        for extension in extensions {
            let post = post_with(extension);
            let flags = [post.is_regular_post(), post.is_shared_post(), post.is_comment()];
            assert_eq!(flags.iter().filter(|flag| **flag).count(), 1);
        }
    }

    #[test]
    fn extension_wire_shape() {
        let comment = FlatPostExtension::Comment {
            root_post_id: Id::new(10),
            parent_id: None,
        };
        assert_eq!(
            serde_json::to_value(comment).unwrap(),
            json!({
                "isRegularPost": false,
                "isSharedPost": false,
                "isComment": true,
                "rootPostId": "10",
            })
        );

        let legacy_shared: FlatPostExtension = serde_json::from_value(json!({
            "isRegularPost": false,
            "isSharedPost": true,
            "isComment": false,
            "sharedPostId": "4",
        }))
        .unwrap();
        assert_eq!(
            legacy_shared,
            FlatPostExtension::SharedPost {
                original_post_id: Id::new(4)
            }
        );

        let ambiguous = serde_json::from_value::<FlatPostExtension>(json!({
            "isRegularPost": true,
            "isComment": true,
            "rootPostId": "1",
        }));
        assert!(ambiguous.is_err());
    }
}
