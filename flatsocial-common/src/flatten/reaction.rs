use crate::{
    chain::{self, Reaction},
    flatten::flatten_who_and_when,
    model::{
        Id,
        reaction::{ReactionKind, ReactionStruct},
    },
};

#[must_use]
pub fn flatten_reaction(reaction: &Reaction) -> ReactionStruct {
    ReactionStruct {
        common: flatten_who_and_when(&reaction.created, reaction.updated.as_ref()),
        id: Id::new(reaction.id),
        kind: match reaction.kind {
            chain::ReactionKind::Upvote => ReactionKind::Upvote,
            chain::ReactionKind::Downvote => ReactionKind::Downvote,
        },
    }
}

#[must_use]
pub fn flatten_reactions(reactions: &[Reaction]) -> Vec<ReactionStruct> {
    reactions.iter().map(flatten_reaction).collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        chain::{self, Reaction},
        flatten::{fixtures::who, flatten_reactions},
        model::{Id, reaction::ReactionKind},
    };
    use serde_json::json;

    #[test]
    fn reactions_carry_no_content() {
        let reactions = [
            Reaction {
                id: 1,
                created: who("alice", 2),
                updated: None,
                kind: chain::ReactionKind::Upvote,
            },
            Reaction {
                id: 2,
                created: who("bob", 3),
                updated: Some(who("bob", 4)),
                kind: chain::ReactionKind::Downvote,
            },
        ];

        let flat = flatten_reactions(&reactions);

        assert_eq!(flat[0].kind, ReactionKind::Upvote);
        assert_eq!(flat[1].id, Id::new(2));
        assert!(flat[1].common.is_updated);
        assert_eq!(flat[1].common.content_id, None);
        assert_eq!(
            serde_json::to_value(&flat[0]).unwrap(),
            json!({
                "createdByAccount": "alice",
                "createdAtBlock": 2,
                "createdAtTime": 12_000,
                "isUpdated": false,
                "id": "1",
                "kind": "Upvote",
            })
        );
    }
}
