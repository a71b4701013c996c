use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ApiResponse;
use crate::id_generator::generate_id;
use crate::{log, log_warn, UserId};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

struct StoredUser {
    user: User,
    // Plain text: this store is a stand-in, not an auth system.
    password: String,
}

/// In-memory accounts with a single signed-in user.
#[derive(Default)]
pub struct AccountStore {
    users: HashMap<UserId, StoredUser>,
    current: Option<User>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_users() -> Self {
        let mut store = Self::new();
        for (id, username, email, created_at) in [
            ("user1", "SnakeMaster", "snakemaster@example.com", "2024-01-15T10:30:00Z"),
            ("user2", "RetroGamer", "retrogamer@example.com", "2024-02-20T14:45:00Z"),
        ] {
            let user = User {
                id: UserId::from(id),
                username: username.to_string(),
                email: email.to_string(),
                created_at: DateTime::parse_from_rfc3339(created_at)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or_default(),
            };
            store.users.insert(
                user.id.clone(),
                StoredUser {
                    user,
                    password: "password123".to_string(),
                },
            );
        }
        store
    }

    pub fn login(&mut self, email: &str, password: &str) -> ApiResponse<User> {
        let found = self
            .users
            .values()
            .find(|u| u.user.email == email && u.password == password)
            .map(|u| u.user.clone());

        match found {
            Some(user) => {
                log!("{} logged in", user.username);
                self.current = Some(user.clone());
                ApiResponse::ok(user)
            }
            None => {
                log_warn!("Failed login for {}", email);
                ApiResponse::err("Invalid email or password")
            }
        }
    }

    pub fn signup(&mut self, username: &str, email: &str, password: &str) -> ApiResponse<User> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return ApiResponse::err("Username, email and password are required");
        }
        if self.users.values().any(|u| u.user.email == email) {
            return ApiResponse::err("Email already registered");
        }
        if self.users.values().any(|u| u.user.username == username) {
            return ApiResponse::err("Username already taken");
        }

        let user = User {
            id: UserId::new(generate_id()),
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        self.users.insert(
            user.id.clone(),
            StoredUser {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        log!("Signed up {} ({})", user.username, user.id);
        self.current = Some(user.clone());
        ApiResponse::ok(user)
    }

    pub fn logout(&mut self) -> ApiResponse<()> {
        self.current = None;
        ApiResponse::done()
    }

    pub fn current_user(&self) -> ApiResponse<User> {
        match &self.current {
            Some(user) => ApiResponse::ok(user.clone()),
            None => ApiResponse::err("Not authenticated"),
        }
    }
}
