//! Account directory: registration, login and principal resolution.
//!
//! Three layers like the rest of the crate (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::Account;
pub use repository::AccountRepository;
pub use service::AccountService;

use crate::{errors::ServiceError, token::Principal};

/// Look up the account behind a principal; every account-scoped operation starts here.
pub async fn resolve_account<R>(repo: &R, principal: &Principal) -> Result<Account, ServiceError>
where
    R: AccountRepository + ?Sized,
{
    let account = repo
        .find_account_by_email(&principal.email)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Not found user".into()))?;
    // token 签发给的账号与当前邮箱对应账号不一致（如邮箱被重新注册）
    if principal.account_id.is_some_and(|id| id != account.id) {
        return Err(ServiceError::Unauthorized("token does not belong to this account".into()));
    }
    Ok(account)
}
