use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{Account, AuthSession, LoginInput, RegisterInput};
use super::repository::AccountRepository;
use crate::errors::ServiceError;
use crate::token::{Principal, TokenCodec};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Account business service independent of web framework
pub struct AccountService<R: ?Sized> {
    repo: Arc<R>,
    tokens: TokenCodec,
}

impl<R: AccountRepository + ?Sized> AccountService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenCodec) -> Self { Self { repo, tokens } }

    /// Register a new account with an argon2 password hash.
    ///
    /// # Examples
    /// ```
    /// use service::account::{AccountService, domain::RegisterInput};
    /// use service::repo::memory::InMemoryStore;
    /// use service::token::TokenCodec;
    /// use std::sync::Arc;
    /// let svc = AccountService::new(Arc::new(InMemoryStore::default()), TokenCodec::new("secret", 1));
    /// let input = RegisterInput { email: "user@example.com".into(), name: "Test".into(), password: "Secret123".into() };
    /// let account = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(account.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<Account, ServiceError> {
        models::account::validate_email(&input.email)?;
        models::account::validate_name(&input.name)?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if let Some(existing) = self.repo.find_account_by_email(input.email.trim()).await? {
            debug!("account exists: {}", existing.email);
            return Err(ServiceError::Conflict("account already exists".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| ServiceError::Validation(format!("cannot hash password: {e}")))?
            .to_string();

        let account = self.repo.create_account(input.email.trim(), input.name.trim(), &hash).await?;
        info!(account_id = %account.id, email = %account.email, event = "account_registered", "account registered");
        Ok(account)
    }

    /// Verify the password and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::account::{AccountService, domain::{RegisterInput, LoginInput}};
    /// use service::repo::memory::InMemoryStore;
    /// use service::token::TokenCodec;
    /// use std::sync::Arc;
    /// let svc = AccountService::new(Arc::new(InMemoryStore::default()), TokenCodec::new("secret", 1));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), name: "N".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.account.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, ServiceError> {
        let invalid = || ServiceError::Unauthorized("invalid credentials".into());
        let account = self.repo
            .find_account_by_email(input.email.trim())
            .await?
            .ok_or_else(invalid)?;

        let cred = self.repo
            .get_credentials(account.id)
            .await?
            .ok_or_else(invalid)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| ServiceError::Db(format!("stored hash unreadable: {e}")))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(invalid());
        }

        let token = self.tokens.issue(account.id, &account.email)?;
        info!(account_id = %account.id, event = "login", "account logged in");
        Ok(AuthSession { account, token })
    }

    /// Account for a verified principal.
    pub async fn resolve(&self, principal: &Principal) -> Result<Account, ServiceError> {
        super::resolve_account(self.repo.as_ref(), principal).await
    }
}
