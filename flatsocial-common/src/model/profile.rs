use crate::model::{AccountId, CanHaveContent, ContentId, HasId, ModelError, common::CommonFields};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Serialized with a `hasProfile` flag next to the profile's own metadata.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(try_from = "ProfileFields", into = "ProfileFields")]
pub struct ProfileStruct {
    pub id: AccountId,
    pub followers_count: u32,
    pub following_accounts_count: u32,
    pub following_spaces_count: u32,
    pub reputation: u32,

    /// Metadata of the account's own profile, when it has created one.
    pub profile: Option<CommonFields>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFields {
    id: AccountId,
    followers_count: u32,
    following_accounts_count: u32,
    following_spaces_count: u32,
    reputation: u32,
    has_profile: bool,
    #[serde(flatten)]
    profile: Option<CommonFields>,
}

impl From<ProfileStruct> for ProfileFields {
    fn from(value: ProfileStruct) -> Self {
        Self {
            has_profile: value.has_profile(),
            id: value.id,
            followers_count: value.followers_count,
            following_accounts_count: value.following_accounts_count,
            following_spaces_count: value.following_spaces_count,
            reputation: value.reputation,
            profile: value.profile,
        }
    }
}

impl TryFrom<ProfileFields> for ProfileStruct {
    type Error = ModelError;

    fn try_from(value: ProfileFields) -> Result<Self, Self::Error> {
        let profile = match (value.has_profile, value.profile) {
            (true, None) => return Err(ModelError::NoProfile(value.id)),
            (true, profile) => profile,
            (false, _) => None,
        };

        Ok(Self {
            id: value.id,
            followers_count: value.followers_count,
            following_accounts_count: value.following_accounts_count,
            following_spaces_count: value.following_spaces_count,
            reputation: value.reputation,
            profile,
        })
    }
}

impl ProfileStruct {
    #[must_use]
    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    pub fn as_public_profile(&self) -> Result<PublicProfileStruct<'_>, ModelError> {
        self.profile
            .as_ref()
            .map(|profile| PublicProfileStruct {
                account: self,
                profile,
            })
            .ok_or_else(|| ModelError::NoProfile(self.id.clone()))
    }
}

pub fn as_public_profile_struct(
    profile: &ProfileStruct,
) -> Result<PublicProfileStruct<'_>, ModelError> {
    profile.as_public_profile()
}

/// An account known to have a profile.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PublicProfileStruct<'a> {
    pub account: &'a ProfileStruct,
    pub profile: &'a CommonFields,
}

impl Deref for PublicProfileStruct<'_> {
    type Target = ProfileStruct;

    fn deref(&self) -> &Self::Target {
        self.account
    }
}

impl HasId for ProfileStruct {
    type Id = AccountId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

impl CanHaveContent for ProfileStruct {
    fn content_id(&self) -> Option<&ContentId> {
        self.profile.as_ref()?.content_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        AccountId, ModelError,
        common::CommonFields,
        profile::{ProfileStruct, as_public_profile_struct},
    };
    use serde_json::json;

    #[test]
    fn narrowing_to_public_profile() {
        let mut account = ProfileStruct {
            id: AccountId::new("alice"),
            ..ProfileStruct::default()
        };
        assert_eq!(
            as_public_profile_struct(&account),
            Err(ModelError::NoProfile(AccountId::new("alice")))
        );

        account.profile = Some(CommonFields::default());
        let public = as_public_profile_struct(&account).unwrap();
        assert_eq!(public.account, &account);
        assert!(public.has_profile());
    }

    #[test]
    fn profile_wire_shape() {
        let account = ProfileStruct {
            id: AccountId::new("bob"),
            reputation: 3,
            ..ProfileStruct::default()
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "bob",
                "followersCount": 0,
                "followingAccountsCount": 0,
                "followingSpacesCount": 0,
                "reputation": 3,
                "hasProfile": false,
            })
        );
        assert_eq!(serde_json::from_value::<ProfileStruct>(value).unwrap(), account);

        let with_profile = ProfileStruct {
            profile: Some(CommonFields {
                created_by_account: AccountId::new("bob"),
                created_at_block: 4,
                ..CommonFields::default()
            }),
            ..account
        };
        let value = serde_json::to_value(&with_profile).unwrap();
        assert_eq!(value["hasProfile"], json!(true));
        assert_eq!(value["createdAtBlock"], json!(4));
        assert_eq!(serde_json::from_value::<ProfileStruct>(value).unwrap(), with_profile);
    }
}
