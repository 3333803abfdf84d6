use crate::{
    chain::{Comment, Post, PostExtension},
    flatten::{flatten_space_or_post_struct, visible_count},
    model::{
        Id, ModelError,
        post::{FlatPostExtension, PostStruct},
    },
};

fn flatten_post_extension(extension: PostExtension) -> FlatPostExtension {
    match extension {
        PostExtension::RegularPost => FlatPostExtension::RegularPost,
        PostExtension::SharedPost(original_post_id) => FlatPostExtension::SharedPost {
            original_post_id: Id::new(original_post_id),
        },
        PostExtension::Comment(Comment {
            root_post_id,
            parent_id,
        }) => FlatPostExtension::Comment {
            root_post_id: Id::new(root_post_id),
            parent_id: parent_id.map(Id::new),
        },
    }
}

pub fn flatten_post_struct(struct_: &Post) -> Result<PostStruct, ModelError> {
    let visible_replies_count = visible_count(
        "Post",
        struct_.id,
        "replies",
        struct_.replies_count,
        struct_.hidden_replies_count,
    )?;

    Ok(PostStruct {
        base: flatten_space_or_post_struct(struct_, struct_.id, &struct_.owner, struct_.hidden),
        space_id: struct_.space_id.map(Id::new),
        extension: flatten_post_extension(struct_.extension),

        replies_count: struct_.replies_count,
        hidden_replies_count: struct_.hidden_replies_count,
        visible_replies_count,
        shares_count: struct_.shares_count,
        upvotes_count: struct_.upvotes_count,
        downvotes_count: struct_.downvotes_count,
        score: struct_.score,
    })
}

pub fn flatten_post_structs(structs: &[Post]) -> Result<Vec<PostStruct>, ModelError> {
    structs.iter().map(flatten_post_struct).collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        chain::{Comment, PostExtension},
        flatten::{
            fixtures::{post, who},
            flatten_post_struct, flatten_post_structs,
        },
        model::{Id, ModelError, post::FlatPostExtension},
    };
    use serde_json::json;

    #[test]
    fn regular_post() {
        let mut raw = post(4, "alice", PostExtension::RegularPost);
        raw.space_id = Some(1);
        raw.replies_count = 5;
        raw.hidden_replies_count = 2;
        raw.upvotes_count = 3;
        raw.score = 7;

        let flat = flatten_post_struct(&raw).unwrap();

        assert!(flat.is_regular_post());
        assert_eq!(flat.space_id, Some(Id::new(1)));
        assert_eq!(flat.visible_replies_count, 3);
        assert_eq!(flat.upvotes_count, 3);
        assert_eq!(flat.score, 7);
        assert_eq!(flat.referenced_post_id(), None);
    }

    #[test]
    fn shared_post() {
        let flat = flatten_post_struct(&post(5, "bob", PostExtension::SharedPost(4))).unwrap();

        assert_eq!(
            flat.extension,
            FlatPostExtension::SharedPost {
                original_post_id: Id::new(4)
            }
        );
        assert_eq!(flat.referenced_post_id(), Some(Id::new(4)));
    }

    #[test]
    fn comment_wire_shape() {
        let mut raw = post(
            6,
            "carol",
            PostExtension::Comment(Comment {
                root_post_id: 4,
                parent_id: Some(5),
            }),
        );
        raw.updated = Some(who("carol", 30));
        raw.edited = Some(true);

        let flat = flatten_post_struct(&raw).unwrap();
        assert_eq!(flat.as_comment().unwrap().replied_to(), Id::new(5));
        assert_eq!(
            serde_json::to_value(&flat).unwrap(),
            json!({
                "createdByAccount": "carol",
                "createdAtBlock": 20,
                "createdAtTime": 120_000,
                "isUpdated": true,
                "updatedByAccount": "carol",
                "updatedAtBlock": 30,
                "updatedAtTime": 180_000,
                "isEdited": true,
                "contentId": "post-cid-6",
                "id": "6",
                "ownerId": "carol",
                "hidden": false,
                "isRegularPost": false,
                "isSharedPost": false,
                "isComment": true,
                "rootPostId": "4",
                "parentId": "5",
                "repliesCount": 0,
                "hiddenRepliesCount": 0,
                "visibleRepliesCount": 0,
                "sharesCount": 0,
                "upvotesCount": 0,
                "downvotesCount": 0,
                "score": 0,
            })
        );
    }

    #[test]
    fn corrupt_reply_counter() {
        let mut raw = post(8, "dave", PostExtension::RegularPost);
        raw.replies_count = 0;
        raw.hidden_replies_count = 1;

        assert!(matches!(
            flatten_post_structs(&[raw]),
            Err(ModelError::CorruptCounter { counter: "replies", .. })
        ));
    }
}
