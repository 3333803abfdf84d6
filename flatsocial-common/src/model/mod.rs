pub mod common;
pub mod data;
pub mod domain;
pub mod post;
pub mod profile;
pub mod reaction;
pub mod space;

use crate::model::{post::PostMarker, space::SpaceMarker};
use derive_where::derive_where;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error, Unexpected, Visitor},
};
use std::{
    fmt::{Debug, Display, Formatter},
    hash::Hash,
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelError {
    #[error("Post {0} is not a shared post")]
    NotASharedPost(Id<PostMarker>),
    #[error("Post {0} is not a comment")]
    NotAComment(Id<PostMarker>),
    #[error("Account {0} has no profile")]
    NoProfile(AccountId),
    #[error("{entity} {id} has {hidden} hidden {counter} but only {total} in total")]
    CorruptCounter {
        entity: &'static str,
        id: String,
        counter: &'static str,
        total: u32,
        hidden: u32,
    },
    #[error("Post extension flags must select exactly one kind")]
    AmbiguousPostExtension,
    #[error("Post extension is missing its {0}")]
    MissingExtensionField(&'static str),
}

/// Numeric on-chain identifier, rendered as its canonical decimal string.
#[derive_where(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Id<Marker>(u64, PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> FromStr for Id<Marker> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str(s).map(Self::new)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

impl<Marker> Serialize for Id<Marker> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct IdVisitor<Marker>(PhantomData<Marker>);

impl<Marker> Visitor<'_> for IdVisitor<Marker> {
    type Value = Id<Marker>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a decimal id as string or unsigned integer")
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Id::new(v))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(Id::new)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Id::from_str(v).map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

impl<'de, Marker> Deserialize<'de> for Id<Marker> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdVisitor(PhantomData))
    }
}

/// Human-readable account address as rendered by the chain codec.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self(account.into())
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pointer to an off-chain content document.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    #[must_use]
    pub fn new(cid: impl Into<String>) -> Self {
        Self(cid.into())
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Display for ContentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key type collected by the unique id helpers.
pub trait EntityKey: Clone + Eq + Hash + Debug {
    /// Blank keys are skipped the same way absent ones are.
    fn is_blank(&self) -> bool {
        false
    }
}

impl<Marker> EntityKey for Id<Marker> {}

impl EntityKey for AccountId {
    fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl EntityKey for ContentId {
    fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

pub trait HasId {
    type Id: EntityKey;

    fn id(&self) -> Self::Id;
}

pub trait HasOwner {
    fn owner_id(&self) -> &AccountId;
}

pub trait CanHaveContent {
    fn content_id(&self) -> Option<&ContentId>;
}

pub trait CanHaveSpaceId {
    fn space_id(&self) -> Option<&Id<SpaceMarker>>;
}

pub trait SpaceOrPost: HasId + HasOwner + CanHaveContent {
    fn hidden(&self) -> bool;
}
