use crate::{
    chain::SpacePermissions,
    model::space::{FlatSpacePermissions, SpacePermissionMap},
};

/// Turns each role's optional permission set into a map of granted permissions.
///
/// Every role present in the input gets an entry, even when its set is absent.
#[must_use]
pub fn flatten_permissions(permissions: Option<&SpacePermissions>) -> FlatSpacePermissions {
    let mut flat_permissions = FlatSpacePermissions::default();

    for (role, permission_set) in permissions.into_iter().flatten() {
        let permission_map: SpacePermissionMap = permission_set
            .iter()
            .flatten()
            .map(|permission| (*permission, true))
            .collect();
        flat_permissions.set_role(*role, permission_map);
    }

    flat_permissions
}

#[cfg(test)]
mod tests {
    use crate::{
        chain::{PermissionRole, SpacePermission, SpacePermissions},
        flatten::flatten_permissions,
    };
    use serde_json::json;

    #[test]
    fn absent_permissions_are_empty() {
        let flat = flatten_permissions(None);

        assert!(flat.is_empty());
        assert!(!flat.is_granted(PermissionRole::Follower, SpacePermission::CreatePosts));
        assert!(!flat.is_granted(PermissionRole::Everyone, SpacePermission::CreatePosts));
        assert_eq!(serde_json::to_value(&flat).unwrap(), json!({}));
    }

    #[test]
    fn roles_map_granted_permissions() {
        let permissions = SpacePermissions::from([
            (PermissionRole::None, None),
            (
                PermissionRole::Follower,
                Some([SpacePermission::CreatePosts, SpacePermission::Upvote].into()),
            ),
            (PermissionRole::SpaceOwner, Some([].into())),
        ]);

        let flat = flatten_permissions(Some(&permissions));

        assert!(flat.is_granted(PermissionRole::Follower, SpacePermission::CreatePosts));
        assert!(!flat.is_granted(PermissionRole::Follower, SpacePermission::Share));
        assert_eq!(flat.everyone_permissions, None);
        assert_eq!(
            serde_json::to_value(&flat).unwrap(),
            json!({
                "nonePermissions": {},
                "followerPermissions": { "CreatePosts": true, "Upvote": true },
                "spaceOwnerPermissions": {},
            })
        );
    }
}
