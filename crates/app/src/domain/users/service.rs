//! Accounts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{TokenIssuer, TokenKind, hash_password, verify_password},
    database::Db,
    domain::users::{
        data::{NewUser, ProfileUpdate, Registration, is_valid_email, normalize_email},
        errors::AccountsServiceError,
        records::{UserRecord, UserRole, UserUuid},
        repository::PgUsersRepository,
    },
    notifications::{Notification, Notifier},
};

/// A freshly issued access token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgUsersRepository,
    tokens: TokenIssuer,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for PgAccountsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgAccountsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db, tokens: TokenIssuer, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            tokens,
            notifier,
        }
    }

    fn issue_session(&self, user: UserRecord) -> Result<Session, AccountsServiceError> {
        let token = self
            .tokens
            .issue(TokenKind::Access, &user.uuid.to_string())?;

        Ok(Session { token, user })
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register(&self, registration: Registration) -> Result<Session, AccountsServiceError> {
        let email = normalize_email(&registration.email);

        if !is_valid_email(&email) {
            return Err(AccountsServiceError::InvalidData("invalid email address"));
        }

        if registration.password.is_empty() {
            return Err(AccountsServiceError::InvalidData("password is required"));
        }

        let password_hash = hash_password(&registration.password).await?;

        let mut tx = self.db.begin().await?;

        if self
            .repository
            .find_user_by_email(&mut tx, &email)
            .await?
            .is_some()
        {
            return Err(AccountsServiceError::AlreadyExists);
        }

        let user = self
            .repository
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    email,
                    password_hash,
                    first_name: registration.first_name,
                    last_name: registration.last_name,
                    role: UserRole::Customer,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "registered user");

        self.notifier.notify(Notification::Welcome {
            to: user.email.clone(),
            first_name: user.first_name.clone(),
        });

        self.issue_session(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AccountsServiceError> {
        let email = normalize_email(email);

        let mut tx = self.db.begin().await?;

        let user = self.repository.find_user_by_email(&mut tx, &email).await?;

        tx.commit().await?;

        let Some(user) = user else {
            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash).await? {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AccountsServiceError::Inactive);
        }

        self.issue_session(user)
    }

    async fn authenticate(&self, token: &str) -> Result<UserRecord, AccountsServiceError> {
        let claims = self.tokens.verify(TokenKind::Access, token).map_err(|error| {
            debug!(error = %error, "rejected bearer token");
            AccountsServiceError::InvalidToken
        })?;

        let user_uuid = claims
            .sub
            .parse::<UserUuid>()
            .map_err(|_parse_error| AccountsServiceError::InvalidToken)?;

        let mut tx = self.db.begin().await?;

        let user = self.repository.find_user(&mut tx, user_uuid).await?;

        tx.commit().await?;

        user.ok_or(AccountsServiceError::InvalidToken)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = if update.is_empty() {
            self.repository.find_user(&mut tx, user).await?
        } else {
            Some(self.repository.update_profile(&mut tx, user, update).await?)
        };

        tx.commit().await?;

        updated.ok_or(AccountsServiceError::NotFound)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AccountsServiceError> {
        let email = normalize_email(email);

        let mut tx = self.db.begin().await?;

        let user = self.repository.find_user_by_email(&mut tx, &email).await?;

        tx.commit().await?;

        let Some(user) = user else {
            debug!("password reset requested for unknown email");
            return Ok(());
        };

        let token = self.tokens.issue(TokenKind::PasswordReset, &user.email)?;

        self.notifier.notify(Notification::PasswordReset {
            to: user.email,
            token,
        });

        Ok(())
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AccountsServiceError> {
        let claims = self
            .tokens
            .verify(TokenKind::PasswordReset, token)
            .map_err(|error| {
                debug!(error = %error, "rejected password reset token");
                AccountsServiceError::InvalidResetToken
            })?;

        if new_password.is_empty() {
            return Err(AccountsServiceError::InvalidData("password is required"));
        }

        let password_hash = hash_password(new_password).await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_password(&mut tx, &claims.sub, &password_hash)
            .await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("password reset completed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create a customer account and sign it in.
    async fn register(&self, registration: Registration) -> Result<Session, AccountsServiceError>;

    /// Exchange an email and password for a fresh session.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AccountsServiceError>;

    /// Resolve an access token to the user it was issued for.
    async fn authenticate(&self, token: &str) -> Result<UserRecord, AccountsServiceError>;

    /// Apply a partial profile update.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AccountsServiceError>;

    /// Email a reset link when the address is registered. Always succeeds for
    /// unknown addresses.
    async fn request_password_reset(&self, email: &str) -> Result<(), AccountsServiceError>;

    /// Consume a reset token and overwrite the password.
    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::records::Address,
        notifications::Notification,
        test::{TestContext, helpers::register},
    };

    use super::*;

    #[tokio::test]
    async fn register_returns_token_for_new_user() -> TestResult {
        let ctx = TestContext::new().await;

        let session = register(&ctx, "A@X.com", "pw1").await?;
        let resolved = ctx.accounts.authenticate(&session.token).await?;

        assert_eq!(session.user.email, "a@x.com");
        assert_eq!(session.user.role, UserRole::Customer);
        assert!(session.user.is_active);
        assert_eq!(resolved.uuid, session.user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn register_sends_welcome_notification() -> TestResult {
        let ctx = TestContext::new().await;

        register(&ctx, "a@x.com", "pw1").await?;

        assert_eq!(
            ctx.notifications(),
            vec![Notification::Welcome {
                to: "a@x.com".to_string(),
                first_name: "Test".to_string(),
            }]
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        register(&ctx, "a@x.com", "pw1").await?;

        let result = register(&ctx, " a@X.COM ", "pw2").await;

        assert!(
            matches!(result, Err(AccountsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_malformed_email() {
        let ctx = TestContext::new().await;

        let result = register(&ctx, "not-an-email", "pw1").await;

        assert!(
            matches!(result, Err(AccountsServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() -> TestResult {
        let ctx = TestContext::new().await;

        register(&ctx, "a@x.com", "pw1").await?;

        let wrong_password = ctx.accounts.login("a@x.com", "wrongpw").await;
        let unknown_email = ctx.accounts.login("b@x.com", "pw1").await;

        assert!(
            matches!(wrong_password, Err(AccountsServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {wrong_password:?}"
        );
        assert!(
            matches!(unknown_email, Err(AccountsServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {unknown_email:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_returns_fresh_session() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = register(&ctx, "a@x.com", "pw1").await?;
        let session = ctx.accounts.login("A@x.com", "pw1").await?;

        assert_eq!(session.user.uuid, registered.user.uuid);
        assert_eq!(
            ctx.accounts.authenticate(&session.token).await?.uuid,
            registered.user.uuid
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_inactive_account_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let session = register(&ctx, "a@x.com", "pw1").await?;
        ctx.set_active(session.user.uuid, false).await;

        let result = ctx.accounts.login("a@x.com", "pw1").await;

        assert!(
            matches!(result, Err(AccountsServiceError::Inactive)),
            "expected Inactive, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_rejects_reset_token() -> TestResult {
        let ctx = TestContext::new().await;

        register(&ctx, "a@x.com", "pw1").await?;

        let reset_token = ctx.tokens.issue(TokenKind::PasswordReset, "a@x.com")?;
        let result = ctx.accounts.authenticate(&reset_token).await;

        assert!(
            matches!(result, Err(AccountsServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_changes_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let session = register(&ctx, "a@x.com", "pw1").await?;

        let address = Address {
            street: "1 Loom Lane".to_string(),
            city: "Knotville".to_string(),
            state: "KS".to_string(),
            postal_code: "12345".to_string(),
            country: "US".to_string(),
        };

        let updated = ctx
            .accounts
            .update_profile(
                session.user.uuid,
                ProfileUpdate {
                    first_name: Some("Zed".to_string()),
                    last_name: None,
                    address: Some(address.clone()),
                },
            )
            .await?;

        assert_eq!(updated.first_name, "Zed");
        assert_eq!(updated.last_name, session.user.last_name);
        assert_eq!(updated.address, Some(address));

        Ok(())
    }

    #[tokio::test]
    async fn empty_profile_update_leaves_record_untouched() -> TestResult {
        let ctx = TestContext::new().await;

        let session = register(&ctx, "a@x.com", "pw1").await?;

        let unchanged = ctx
            .accounts
            .update_profile(session.user.uuid, ProfileUpdate::default())
            .await?;

        assert_eq!(unchanged.updated_at, session.user.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn password_reset_round_trip() -> TestResult {
        let ctx = TestContext::new().await;

        register(&ctx, "a@x.com", "pw1").await?;
        ctx.accounts.request_password_reset("a@x.com").await?;

        let Some(Notification::PasswordReset { token, .. }) = ctx.notifications().pop() else {
            panic!("expected a password reset notification");
        };

        ctx.accounts.reset_password(&token, "pw2").await?;

        assert!(ctx.accounts.login("a@x.com", "pw2").await.is_ok());
        assert!(ctx.accounts.login("a@x.com", "pw1").await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn password_reset_request_for_unknown_email_is_silent() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts.request_password_reset("ghost@x.com").await?;

        assert!(ctx.notifications().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn reset_with_access_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let session = register(&ctx, "a@x.com", "pw1").await?;

        let result = ctx.accounts.reset_password(&session.token, "pw2").await;

        assert!(
            matches!(result, Err(AccountsServiceError::InvalidResetToken)),
            "expected InvalidResetToken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reset_for_vanished_email_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let token = ctx.tokens.issue(TokenKind::PasswordReset, "ghost@x.com")?;

        let result = ctx.accounts.reset_password(&token, "pw2").await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
