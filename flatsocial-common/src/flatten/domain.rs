use crate::{
    chain::{DomainMeta, InnerValue, bytes_to_human},
    model::{Id, domain::DomainStruct},
};

#[must_use]
pub fn flatten_domain_struct(domain: &DomainMeta) -> DomainStruct {
    let inner_space = match domain.inner_value {
        Some(InnerValue::Space(space_id)) => Some(Id::new(space_id)),
        Some(InnerValue::Account(_) | InnerValue::Post(_)) | None => None,
    };

    DomainStruct {
        owner: domain.owner.clone(),
        expires_at: domain.expires_at,
        outer_value: domain.outer_value.as_deref().map(bytes_to_human),
        inner_space,
    }
}

#[must_use]
pub fn flatten_domain_structs(domains: &[DomainMeta]) -> Vec<DomainStruct> {
    domains.iter().map(flatten_domain_struct).collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        chain::{DomainMeta, InnerValue},
        flatten::{fixtures::who, flatten_domain_structs},
        model::{AccountId, Id},
    };

    #[test]
    fn only_space_targets_are_kept() {
        let domain = |inner_value| DomainMeta {
            created: who("alice", 1),
            expires_at: 1_000,
            owner: AccountId::new("alice"),
            inner_value,
            outer_value: Some(b"https://example.com".to_vec()),
            ..DomainMeta::default()
        };

        let flat = flatten_domain_structs(&[
            domain(Some(InnerValue::Space(7))),
            domain(Some(InnerValue::Post(8))),
            domain(Some(InnerValue::Account(AccountId::new("bob")))),
            domain(None),
        ]);

        assert_eq!(flat[0].inner_space, Some(Id::new(7)));
        assert_eq!(flat[0].expires_at, 1_000);
        assert_eq!(flat[0].outer_value.as_deref(), Some("https://example.com"));
        assert!(flat[1..].iter().all(|domain| domain.inner_space.is_none()));
    }
}
