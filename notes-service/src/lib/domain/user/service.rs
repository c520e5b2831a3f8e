use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service.
    ///
    /// # Arguments
    /// * `repository` - User persistence
    /// * `authenticator` - Shared password hashing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hash(&self, password: &Password) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password.as_str())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()).into())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash(&command.password)?;
        let now = Utc::now();

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            has_notes_premium: false,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.get_user(id).await?;

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash(&new_password)?;
        }

        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn grant_premium(&self, id: &UserId) -> Result<User, UserError> {
        let user = self.repository.set_premium(id, true).await?;
        tracing::info!(user_id = %user.id, "Premium granted");

        Ok(user)
    }
}
