use crate::model::{
    AccountId, CanHaveContent, CanHaveSpaceId, ContentId, EntityKey, HasOwner, Id,
    data::HasStruct, space::SpaceMarker,
};
use indexmap::IndexSet;

/// Collects the distinct non-blank values of `field` across `entities`, in order of
/// first appearance.
pub fn get_unique_ids<'a, E, K>(
    entities: impl IntoIterator<Item = &'a E>,
    field: impl Fn(&'a E::Struct) -> Option<&'a K>,
) -> Vec<K>
where
    E: HasStruct + 'a,
    K: EntityKey + 'a,
{
    entities
        .into_iter()
        .filter_map(|entity| field(entity.struct_ref()))
        .filter(|key| !key.is_blank())
        .cloned()
        .collect::<IndexSet<K>>()
        .into_iter()
        .collect()
}

pub fn get_unique_owner_ids<'a, E>(entities: impl IntoIterator<Item = &'a E>) -> Vec<AccountId>
where
    E: HasStruct + 'a,
    E::Struct: HasOwner,
{
    get_unique_ids(entities, |struct_| Some(struct_.owner_id()))
}

pub fn get_unique_content_ids<'a, E>(entities: impl IntoIterator<Item = &'a E>) -> Vec<ContentId>
where
    E: HasStruct + 'a,
    E::Struct: CanHaveContent,
{
    get_unique_ids(entities, CanHaveContent::content_id)
}

pub fn get_unique_space_ids<'a, E>(
    entities: impl IntoIterator<Item = &'a E>,
) -> Vec<Id<SpaceMarker>>
where
    E: HasStruct + 'a,
    E::Struct: CanHaveSpaceId,
{
    get_unique_ids(entities, CanHaveSpaceId::space_id)
}
