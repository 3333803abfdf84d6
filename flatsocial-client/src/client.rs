use flatsocial_common::{
    chain::{DomainMeta, Post, Reaction, SocialAccountWithId, Space},
    model::{
        AccountId, ContentId, Id, ModelError, post::PostMarker, reaction::ReactionMarker,
        space::SpaceMarker,
    },
};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Error querying the chain: {0}")]
    Chain(BoxError),
    #[error("Error querying the content store: {0}")]
    ContentStore(BoxError),
    #[error("Error connecting to {url}: {source}")]
    Connection { url: String, source: BoxError },
    #[error("A chain record was invalid: {0}")]
    Model(#[from] ModelError),
}

/// Raw access to chain state and off-chain content.
///
/// Lookups return only the records that exist, in no particular order.
pub trait SocialApi: Send + Sync {
    fn find_spaces(&self, ids: &[Id<SpaceMarker>]) -> impl Future<Output = Result<Vec<Space>>> + Send;

    fn find_posts(&self, ids: &[Id<PostMarker>]) -> impl Future<Output = Result<Vec<Post>>> + Send;

    fn find_social_accounts(
        &self,
        ids: &[AccountId],
    ) -> impl Future<Output = Result<Vec<SocialAccountWithId>>> + Send;

    fn find_reactions(
        &self,
        ids: &[Id<ReactionMarker>],
    ) -> impl Future<Output = Result<Vec<Reaction>>> + Send;

    fn find_domains(&self, names: &[String]) -> impl Future<Output = Result<Vec<DomainMeta>>> + Send;

    /// Raw JSON documents keyed by the id they were stored under.
    fn find_contents(
        &self,
        cids: &[ContentId],
    ) -> impl Future<Output = Result<HashMap<ContentId, Value>>> + Send;
}
