//! Users service
//!
//! Local user records: sign-up, profile edits and admin approval.
//! Deleting a user does not touch their jobs or applications.

use crate::database::{Collection, CreateUserRequest, Role, Store, UpdateUserRequest, User};
use crate::error::{AppError, Result};
use crate::ids::UserId;

#[derive(Clone)]
pub struct UsersService {
    users: Collection<User>,
}

impl UsersService {
    pub fn new(store: Store) -> Self {
        Self {
            users: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    pub async fn get(&self, id: &UserId) -> Result<User> {
        self.users.get(id).await
    }

    /// Case-insensitive email lookup
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim();
        let users = self.list().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    pub async fn list_by_role(&self, role: Role) -> Result<Vec<User>> {
        let users = self.list().await?;
        Ok(users.into_iter().filter(|u| u.role == role).collect())
    }

    /// Users waiting for an admin to approve them
    pub async fn pending_approvals(&self) -> Result<Vec<User>> {
        let users = self.list().await?;
        Ok(users.into_iter().filter(|u| !u.approved).collect())
    }

    /// Register a user. Students are approved immediately.
    pub async fn create(&self, req: CreateUserRequest) -> Result<User> {
        let email = req.email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::InvalidInput("email is required".to_string()));
        }
        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::Validation(format!(
                "A user with email {} already exists",
                email
            )));
        }

        let role = req.role.unwrap_or(Role::Student);
        tracing::info!("Creating {:?} user: {}", role, email);

        let user = User {
            id: UserId::generate(),
            role,
            name: req.name,
            company_name: req.company_name,
            email,
            password: None,
            approved: role.auto_approved(),
            phone: req.phone,
            cgpa: req.cgpa,
            branch: req.branch,
            skills: req.skills,
            resume_url: None,
            website: None,
            description: None,
            linkedin: None,
            github: None,
        };

        self.users.append(user).await
    }

    pub async fn update(&self, id: &UserId, patch: &UpdateUserRequest) -> Result<User> {
        tracing::debug!("Updating user: {}", id);
        self.users.merge(id, patch).await
    }

    pub async fn approve(&self, id: &UserId) -> Result<User> {
        tracing::info!("Approving user: {}", id);
        self.users
            .modify(id, |u| {
                u.approved = true;
                Ok(())
            })
            .await
    }

    pub async fn remove(&self, id: &UserId) -> Result<()> {
        tracing::info!("Deleting user: {}", id);
        self.users.remove(id).await?;
        Ok(())
    }
}
