use crate::{
    chain::{PermissionRole, Space, SpacePermission, bytes_to_human},
    flatten::{flatten_permissions, flatten_space_or_post_struct, visible_count},
    model::{Id, ModelError, space::SpaceStruct},
};

pub fn flatten_space_struct(struct_: &Space) -> Result<SpaceStruct, ModelError> {
    let visible_posts_count = visible_count(
        "Space",
        struct_.id,
        "posts",
        struct_.posts_count,
        struct_.hidden_posts_count,
    )?;
    let permissions = flatten_permissions(struct_.permissions.as_ref());

    Ok(SpaceStruct {
        base: flatten_space_or_post_struct(struct_, struct_.id, &struct_.owner, struct_.hidden),
        parent_id: struct_.parent_id.map(Id::new),
        handle: struct_.handle.as_deref().map(bytes_to_human),

        can_follower_create_posts: permissions
            .is_granted(PermissionRole::Follower, SpacePermission::CreatePosts),
        can_everyone_create_posts: permissions
            .is_granted(PermissionRole::Everyone, SpacePermission::CreatePosts),
        permissions,

        posts_count: struct_.posts_count,
        hidden_posts_count: struct_.hidden_posts_count,
        visible_posts_count,
        followers_count: struct_.followers_count,
        score: struct_.score,
    })
}

pub fn flatten_space_structs(structs: &[Space]) -> Result<Vec<SpaceStruct>, ModelError> {
    structs.iter().map(flatten_space_struct).collect()
}
