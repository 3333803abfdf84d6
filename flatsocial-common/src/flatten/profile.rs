use crate::{
    chain::SocialAccountWithId,
    flatten::flatten_common_fields,
    model::profile::ProfileStruct,
};

#[must_use]
pub fn flatten_profile_struct(account: &SocialAccountWithId) -> ProfileStruct {
    let SocialAccountWithId { id, account } = account;

    ProfileStruct {
        id: id.clone(),
        followers_count: account.followers_count,
        following_accounts_count: account.following_accounts_count,
        following_spaces_count: account.following_spaces_count,
        reputation: account.reputation,
        profile: account.profile.as_ref().map(flatten_common_fields),
    }
}

#[must_use]
pub fn flatten_profile_structs(accounts: &[SocialAccountWithId]) -> Vec<ProfileStruct> {
    accounts.iter().map(flatten_profile_struct).collect()
}
