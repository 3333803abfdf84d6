//! In-memory doubles for the transport collaborators.

use crate::{
    client::{ClientError, Result, SocialApi},
    config::ConnectionConfig,
    resolver::Connector,
};
use flatsocial_common::{
    chain::{Content, DomainMeta, Post, Reaction, SocialAccountWithId, Space, WhoAndWhen},
    model::{
        AccountId, ContentId, Id, post::PostMarker, reaction::ReactionMarker, space::SpaceMarker,
    },
};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

pub fn config() -> ConnectionConfig {
    ConnectionConfig {
        substrate_node_url: "ws://127.0.0.1:9944".to_owned(),
        ipfs_node_url: "http://127.0.0.1:8080".to_owned(),
        ipfs_admin_node_url: None,
        offchain_url: None,
    }
}

pub fn who(account: &str) -> WhoAndWhen {
    WhoAndWhen {
        account: AccountId::new(account),
        block: 1,
        time: 6_000,
    }
}

pub fn ipfs(cid: &str) -> Content {
    Content::Ipfs(cid.as_bytes().to_vec())
}

#[derive(Clone, Debug, Default)]
pub struct FakeApi {
    pub spaces: Vec<Space>,
    pub posts: Vec<Post>,
    pub accounts: Vec<SocialAccountWithId>,
    pub reactions: Vec<Reaction>,
    pub domains: Vec<(String, DomainMeta)>,
    pub contents: HashMap<ContentId, Value>,
}

impl SocialApi for FakeApi {
    async fn find_spaces(&self, ids: &[Id<SpaceMarker>]) -> Result<Vec<Space>> {
        Ok(self
            .spaces
            .iter()
            .filter(|space| ids.contains(&Id::new(space.id)))
            .cloned()
            .collect())
    }

    async fn find_posts(&self, ids: &[Id<PostMarker>]) -> Result<Vec<Post>> {
        // Reversed, lookups promise no order.
        Ok(self
            .posts
            .iter()
            .rev()
            .filter(|post| ids.contains(&Id::new(post.id)))
            .cloned()
            .collect())
    }

    async fn find_social_accounts(&self, ids: &[AccountId]) -> Result<Vec<SocialAccountWithId>> {
        Ok(self
            .accounts
            .iter()
            .filter(|account| ids.contains(&account.id))
            .cloned()
            .collect())
    }

    async fn find_reactions(&self, ids: &[Id<ReactionMarker>]) -> Result<Vec<Reaction>> {
        Ok(self
            .reactions
            .iter()
            .filter(|reaction| ids.contains(&Id::new(reaction.id)))
            .cloned()
            .collect())
    }

    async fn find_domains(&self, names: &[String]) -> Result<Vec<DomainMeta>> {
        Ok(self
            .domains
            .iter()
            .filter(|(name, _)| names.contains(name))
            .map(|(_, domain)| domain.clone())
            .collect())
    }

    async fn find_contents(&self, cids: &[ContentId]) -> Result<HashMap<ContentId, Value>> {
        Ok(cids
            .iter()
            .filter_map(|cid| Some((cid.clone(), self.contents.get(cid)?.clone())))
            .collect())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Attempts(Arc<AtomicUsize>);

impl Attempts {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Counts connection attempts and fails the first `failures` of them.
#[derive(Debug, Default)]
pub struct FakeConnector {
    api: FakeApi,
    failures: usize,
    attempts: Attempts,
}

impl FakeConnector {
    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Attempts {
        self.attempts.clone()
    }
}

impl Connector for FakeConnector {
    type Api = FakeApi;

    async fn connect(&self, config: &ConnectionConfig) -> Result<FakeApi, ClientError> {
        let attempt = self.attempts.0.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if attempt < self.failures {
            return Err(ClientError::Connection {
                url: config.substrate_node_url.clone(),
                source: "connection refused".into(),
            });
        }
        Ok(self.api.clone())
    }
}
