//! Client returning flat structs and data records instead of raw chain records.

use crate::client::{Result, SocialApi};
use flatsocial_common::{
    content::{CommonContent, PostContent, ProfileContent, SpaceContent},
    flatten::{
        flatten_domain_structs, flatten_post_structs, flatten_profile_structs,
        flatten_reactions, flatten_space_structs, get_unique_content_ids, get_unique_owner_ids,
        get_unique_space_ids,
    },
    model::{
        AccountId, CanHaveContent, ContentId, HasId, Id,
        data::{
            CommonData, HasStruct, PostData, PostWithAllDetails, PostWithSomeDetails,
            ProfileData, SpaceData, is_public,
        },
        domain::DomainStruct,
        post::{PostMarker, PostStruct},
        profile::ProfileStruct,
        reaction::{ReactionMarker, ReactionStruct},
        space::{SpaceMarker, SpaceStruct},
    },
};
use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, warn};

/// Which referenced entities [`FlatSocialApi::find_post_with_some_details`] resolves.
/// The referenced post of a share or comment is always resolved.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct PostDetailsOpts {
    pub with_owner: bool,
    pub with_space: bool,
}

impl PostDetailsOpts {
    pub const ALL: Self = Self {
        with_owner: true,
        with_space: true,
    };
}

pub struct FlatSocialApi<A> {
    api: Arc<A>,
}

impl<A: SocialApi> FlatSocialApi<A> {
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn base(&self) -> &Arc<A> {
        &self.api
    }

    pub async fn find_spaces(&self, ids: &[Id<SpaceMarker>]) -> Result<Vec<SpaceStruct>> {
        let spaces = self.api.find_spaces(ids).await?;
        Ok(flatten_space_structs(&spaces)?)
    }

    pub async fn find_posts(&self, ids: &[Id<PostMarker>]) -> Result<Vec<PostStruct>> {
        let posts = self.api.find_posts(ids).await?;
        Ok(flatten_post_structs(&posts)?)
    }

    pub async fn find_profiles(&self, ids: &[AccountId]) -> Result<Vec<ProfileStruct>> {
        let accounts = self.api.find_social_accounts(ids).await?;
        Ok(flatten_profile_structs(&accounts))
    }

    pub async fn find_reactions(&self, ids: &[Id<ReactionMarker>]) -> Result<Vec<ReactionStruct>> {
        let reactions = self.api.find_reactions(ids).await?;
        Ok(flatten_reactions(&reactions))
    }

    pub async fn find_domains(&self, names: &[String]) -> Result<Vec<DomainStruct>> {
        let domains = self.api.find_domains(names).await?;
        Ok(flatten_domain_structs(&domains))
    }

    /// Fetches and decodes documents. Ones that do not match `C` count as missing.
    pub async fn find_contents<C: DeserializeOwned>(
        &self,
        cids: &[ContentId],
    ) -> Result<HashMap<ContentId, C>> {
        if cids.is_empty() {
            return Ok(HashMap::new());
        }

        let documents = self.api.find_contents(cids).await?;
        debug!(requested = cids.len(), found = documents.len(), "Fetched contents");

        let contents = documents
            .into_iter()
            .filter_map(|(cid, document)| match serde_json::from_value(document) {
                Ok(content) => Some((cid, content)),
                Err(e) => {
                    warn!(%cid, error = %e, "Skipping malformed content document");
                    None
                }
            })
            .collect();
        Ok(contents)
    }

    async fn with_contents<S, C>(&self, structs: Vec<S>) -> Result<Vec<CommonData<S, C>>>
    where
        S: HasId + CanHaveContent + HasStruct<Struct = S>,
        C: CommonContent + DeserializeOwned + Clone,
    {
        let cids = get_unique_content_ids(&structs);
        let contents = self.find_contents::<C>(&cids).await?;

        Ok(structs
            .into_iter()
            .map(|struct_| {
                let content = struct_
                    .content_id()
                    .and_then(|cid| contents.get(cid))
                    .cloned();
                CommonData::new(struct_, content)
            })
            .collect())
    }

    pub async fn find_space_data(&self, ids: &[Id<SpaceMarker>]) -> Result<Vec<SpaceData>> {
        let spaces = self.find_spaces(ids).await?;
        self.with_contents::<_, SpaceContent>(spaces).await
    }

    pub async fn find_post_data(&self, ids: &[Id<PostMarker>]) -> Result<Vec<PostData>> {
        let posts = self.find_posts(ids).await?;
        self.with_contents::<_, PostContent>(posts).await
    }

    pub async fn find_profile_data(&self, ids: &[AccountId]) -> Result<Vec<ProfileData>> {
        let profiles = self.find_profiles(ids).await?;
        self.with_contents::<_, ProfileContent>(profiles).await
    }

    /// Spaces that are neither hidden nor missing their content.
    pub async fn find_public_spaces(&self, ids: &[Id<SpaceMarker>]) -> Result<Vec<SpaceData>> {
        let spaces = self.find_space_data(ids).await?;
        Ok(spaces.into_iter().filter(|space| is_public(Some(space))).collect())
    }

    pub async fn find_public_posts(&self, ids: &[Id<PostMarker>]) -> Result<Vec<PostData>> {
        let posts = self.find_post_data(ids).await?;
        Ok(posts.into_iter().filter(|post| is_public(Some(post))).collect())
    }

    /// Posts in the order of `ids`, each with the post it shares or comments on and,
    /// as requested, its owner's profile and its space. A comment without a space of its
    /// own is shown in its root post's space. Missing posts are left out.
    pub async fn find_post_with_some_details(
        &self,
        ids: &[Id<PostMarker>],
        opts: PostDetailsOpts,
    ) -> Result<Vec<PostWithSomeDetails>> {
        let posts = self.find_post_data(ids).await?;

        let ext_ids = posts
            .iter()
            .filter_map(|post| post.struct_.referenced_post_id())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let ext_posts = if ext_ids.is_empty() {
            Vec::new()
        } else {
            self.find_post_data(&ext_ids).await?
        };

        let all_posts = posts.iter().chain(&ext_posts);
        let owner_ids = if opts.with_owner {
            get_unique_owner_ids(all_posts.clone())
        } else {
            Vec::new()
        };
        let space_ids = if opts.with_space {
            get_unique_space_ids(all_posts)
        } else {
            Vec::new()
        };
        debug!(
            posts = posts.len(),
            ext_posts = ext_posts.len(),
            owners = owner_ids.len(),
            spaces = space_ids.len(),
            "Resolving post details"
        );

        let (owners, spaces) = futures::try_join!(
            self.find_profile_data_if_any(&owner_ids),
            self.find_space_data_if_any(&space_ids),
        )?;
        let owners = by_id(owners);
        let spaces = by_id(spaces);

        let with_details = |post: PostData, space_id: Option<Id<SpaceMarker>>| {
            let owner = owners.get(&post.struct_.base.owner_id).cloned();
            let space = space_id
                .or(post.struct_.space_id)
                .and_then(|space_id| spaces.get(&space_id))
                .cloned();
            PostWithSomeDetails {
                owner,
                space,
                ..PostWithSomeDetails::new(post)
            }
        };

        let ext_posts = by_id(ext_posts);
        let mut posts = by_id(posts);
        Ok(ids
            .iter()
            .filter_map(|id| posts.remove(id))
            .map(|post| {
                let ext = post
                    .struct_
                    .referenced_post_id()
                    .and_then(|ext_id| ext_posts.get(&ext_id))
                    .cloned()
                    .map(|ext| with_details(ext, None));
                let root_space_id = ext
                    .as_ref()
                    .filter(|_| post.struct_.is_comment())
                    .and_then(|ext| ext.post.struct_.space_id);

                PostWithSomeDetails {
                    ext: ext.map(Box::new),
                    ..with_details(post, root_space_id)
                }
            })
            .collect())
    }

    pub async fn find_post_with_all_details(
        &self,
        ids: &[Id<PostMarker>],
    ) -> Result<Vec<PostWithAllDetails>> {
        self.find_post_with_some_details(ids, PostDetailsOpts::ALL)
            .await
    }

    async fn find_profile_data_if_any(&self, ids: &[AccountId]) -> Result<Vec<ProfileData>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_profile_data(ids).await
    }

    async fn find_space_data_if_any(&self, ids: &[Id<SpaceMarker>]) -> Result<Vec<SpaceData>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_space_data(ids).await
    }
}

fn by_id<S: HasId, C>(data: Vec<CommonData<S, C>>) -> HashMap<S::Id, CommonData<S, C>> {
    data.into_iter().map(|data| (data.id.clone(), data)).collect()
}
