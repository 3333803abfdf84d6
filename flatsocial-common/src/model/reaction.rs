use crate::model::{HasId, Id, common::CommonFields};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ReactionMarker;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub enum ReactionKind {
    #[default]
    Upvote,
    Downvote,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionStruct {
    #[serde(flatten)]
    pub common: CommonFields,
    pub id: Id<ReactionMarker>,
    pub kind: ReactionKind,
}

impl HasId for ReactionStruct {
    type Id = Id<ReactionMarker>;

    fn id(&self) -> Self::Id {
        self.id
    }
}
