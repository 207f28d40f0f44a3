//! User Repository

use std::sync::Arc;

use super::{RepoError, RepoResult};
use crate::db::models::{Role, User, UserCreate, UserPublic, static_map_url};
use crate::db::{DataStore, USERS};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<DataStore>,
}

impl UserRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Username uniqueness is the only validation. The static-map URL is
    /// derived from the location here, once, and never recomputed.
    pub fn register(&self, data: UserCreate) -> RepoResult<()> {
        let mut collections = self.store.lock();

        if collections
            .users
            .iter()
            .any(|u| u.username == data.username)
        {
            return Err(RepoError::Duplicate(data.username));
        }

        let map_image = data.location.as_ref().map(static_map_url);
        collections.users.push(User {
            username: data.username,
            password: data.password,
            address: data.address,
            location: data.location,
            location_link: data.location_link,
            map_image,
            role: Role::User,
        });

        self.store.gateway().save(USERS, &collections.users)?;
        Ok(())
    }

    /// Exact plaintext credential match; timing safety is out of scope.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<UserPublic> {
        let collections = self.store.lock();
        collections
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(UserPublic::from)
    }

    /// Drop every non-admin account, returning how many were removed.
    pub fn clear_retaining_admin(&self) -> RepoResult<usize> {
        let mut collections = self.store.lock();
        let before = collections.users.len();
        collections.users.retain(|u| u.role == Role::Admin);
        self.store.gateway().save(USERS, &collections.users)?;
        Ok(before - collections.users.len())
    }
}
