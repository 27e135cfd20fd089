use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{info, debug, warn, instrument};

use super::domain::{AccessToken, AuthUser, Caller, ChangePasswordInput, LoginInput, NewAccount, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::TokenIssuer;

const MIN_PASSWORD_LEN: usize = 8;

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    tokens: TokenIssuer,
    allow_admin_signup: bool,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenIssuer) -> Self {
        Self { repo, tokens, allow_admin_signup: false }
    }

    /// Let callers register with the `admin` role.
    pub fn with_admin_signup(mut self, allow: bool) -> Self {
        self.allow_admin_signup = allow;
        self
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenIssuer, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let tokens = TokenIssuer::new("secret", chrono::Duration::minutes(20)).unwrap();
    /// let svc = AuthService::new(repo, tokens);
    /// let input = RegisterInput {
    ///     full_name: "Test User".into(),
    ///     email: "user@example.com".into(),
    ///     mobile_number: "01000000001".into(),
    ///     password: "Secret123".into(),
    ///     role: "patient".into(),
    /// };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, role = %input.role))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        validate_password(&input.password)?;
        models::user::validate_role(&input.role)?;
        if input.role == models::user::ADMIN_ROLE && !self.allow_admin_signup {
            return Err(AuthError::Validation("admin accounts cannot be self-registered".into()));
        }
        if let Some(existing) = self.repo.find_user_by_email_or_mobile(&input.email, &input.mobile_number).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create_user(NewAccount {
                full_name: input.full_name,
                email: input.email,
                mobile_number: input.mobile_number,
                password_hash: hash,
                role: input.role,
            })
            .await?;
        info!(user_id = user.id, email = %user.email, role = %user.role, "user_registered");
        Ok(user)
    }

    /// Check the password grant and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenIssuer, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let tokens = TokenIssuer::new("secret", chrono::Duration::minutes(20)).unwrap();
    /// let svc = AuthService::new(repo, tokens);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     full_name: "N".into(), email: "u@e.com".into(), mobile_number: "0100".into(),
    ///     password: "Passw0rd".into(), role: "doctor".into(),
    /// }));
    /// let token = tokio_test::block_on(svc.login(LoginInput { username: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(token.token_type, "bearer");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AccessToken, AuthError> {
        let user = self.repo
            .find_user_by_email(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if !user.is_active {
            warn!(user_id = user.id, "login for inactive user");
            return Err(AuthError::Unauthorized);
        }

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        verify_password(&input.password, &cred.password_hash)?;

        let token = self.tokens.issue(&user.email, user.id, &user.role)?;
        info!(user_id = user.id, "token_issued");
        Ok(AccessToken::bearer(token))
    }

    /// Resolve a bearer token to the calling identity.
    pub fn authenticate(&self, token: &str) -> Result<Caller, AuthError> {
        self.tokens.verify(token).map(Caller::from)
    }

    /// Replace the caller's password after checking the current one.
    #[instrument(skip(self, input), fields(user_id = caller.id))]
    pub async fn change_password(&self, caller: &Caller, input: ChangePasswordInput) -> Result<(), AuthError> {
        let cred = self.repo
            .get_credentials(caller.id)
            .await?
            .ok_or(AuthError::NotFound)?;
        verify_password(&input.password, &cred.password_hash)?;
        if input.new_password != input.new_password_confirm {
            return Err(AuthError::Validation("new password confirmation does not match".into()));
        }
        validate_password(&input.new_password)?;

        let hash = hash_password(&input.new_password)?;
        self.repo.update_password(caller.id, hash).await?;
        info!(user_id = caller.id, "password_changed");
        Ok(())
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| AuthError::HashError(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::Unauthorized)
}
