//! Conversion of decoded chain records into flat structs.
//!
//! Every function here is pure: it only reads its input and never fails on absent
//! optional fields. The space and post flatteners refuse counters where the hidden
//! part exceeds the total, since that can only come from corrupt chain state.

mod domain;
mod permissions;
mod post;
mod profile;
mod reaction;
mod space;
mod unique;

pub use domain::{flatten_domain_struct, flatten_domain_structs};
pub use permissions::flatten_permissions;
pub use post::{flatten_post_struct, flatten_post_structs};
pub use profile::{flatten_profile_struct, flatten_profile_structs};
pub use reaction::{flatten_reaction, flatten_reactions};
pub use space::{flatten_space_struct, flatten_space_structs};
pub use unique::{get_unique_content_ids, get_unique_ids, get_unique_owner_ids, get_unique_space_ids};

use crate::{
    chain::{Content, SuperCommonStruct, WhoAndWhen, bytes_to_human},
    model::{
        AccountId, ContentId, Id, ModelError,
        common::{CommonFields, SpaceOrPostCommon},
    },
};

fn flatten_created_field(created: &WhoAndWhen, fields: &mut CommonFields) {
    fields.created_by_account = created.account.clone();
    fields.created_at_block = created.block;
    fields.created_at_time = created.time;
}

fn flatten_updated_field(updated: Option<&WhoAndWhen>, fields: &mut CommonFields) {
    fields.is_updated = updated.is_some();
    fields.updated_by_account = updated.map(|updated| updated.account.clone());
    fields.updated_at_block = updated.map(|updated| updated.block);
    fields.updated_at_time = updated.map(|updated| updated.time);
}

/// Only external storage pointers yield a content id.
fn flatten_content_field(content: &Content) -> Option<ContentId> {
    match content {
        Content::Ipfs(cid) => Some(ContentId::new(bytes_to_human(cid))),
        Content::None | Content::Raw(_) | Content::Hyper(_) => None,
    }
}

fn flatten_who_and_when(created: &WhoAndWhen, updated: Option<&WhoAndWhen>) -> CommonFields {
    let mut fields = CommonFields::default();
    flatten_created_field(created, &mut fields);
    flatten_updated_field(updated, &mut fields);
    fields
}

#[must_use]
pub fn flatten_common_fields<S: SuperCommonStruct>(struct_: &S) -> CommonFields {
    CommonFields {
        is_edited: struct_.edited(),
        content_id: flatten_content_field(struct_.content()),
        ..flatten_who_and_when(struct_.created(), struct_.updated())
    }
}

fn flatten_space_or_post_struct<S, Marker>(
    struct_: &S,
    id: u64,
    owner: &AccountId,
    hidden: bool,
) -> SpaceOrPostCommon<Marker>
where
    S: SuperCommonStruct,
{
    SpaceOrPostCommon {
        common: flatten_common_fields(struct_),
        id: Id::new(id),
        owner_id: owner.clone(),
        hidden,
    }
}

fn visible_count(
    entity: &'static str,
    id: u64,
    counter: &'static str,
    total: u32,
    hidden: u32,
) -> Result<u32, ModelError> {
    total
        .checked_sub(hidden)
        .ok_or_else(|| ModelError::CorruptCounter {
            entity,
            id: id.to_string(),
            counter,
            total,
            hidden,
        })
}
