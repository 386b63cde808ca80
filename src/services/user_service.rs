use std::sync::Arc;

use pbkdf2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Pbkdf2,
};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::request::{LoginRequest, RegisterRequest},
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .repository
            .create(User::new(&username, &email, &password_hash))
            .await?;

        log::info!("New user registered: {} ({})", user.username, user.email);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        // The same message for both unknown user and bad password, so the
        // response does not reveal which usernames exist.
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let user = self
            .repository
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }

        Ok(user)
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.find_all().await
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)?;
    Ok(Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok())
}
