use tracing::info;

use crate::{
    error::RegistryError,
    models::{Role, User},
    store::Store,
};

/// Exact match on both fields, first hit wins.
pub fn verify_credentials(users: &[User], username: &str, password: &str) -> Option<Role> {
    users
        .iter()
        .find(|user| user.username == username && user.password == password)
        .map(|user| user.role)
}

pub fn authenticate(store: &Store, username: &str, password: &str) -> Result<Role, RegistryError> {
    verify_credentials(&store.users(), username, password).ok_or(RegistryError::InvalidCredentials)
}

pub fn register_user(
    store: &Store,
    username: &str,
    password: &str,
    role: &str,
) -> Result<User, RegistryError> {
    let role: Role = role.parse().map_err(|_| RegistryError::InvalidUser)?;

    if username.is_empty() || password.is_empty() {
        return Err(RegistryError::InvalidUser);
    }

    let mut users = store.users();
    if users.iter().any(|user| user.username == username)
        || users.unreadable_has("username", username)
    {
        return Err(RegistryError::DuplicateUser);
    }

    let user = User {
        username: username.to_string(),
        password: password.to_string(),
        role,
        extra: Default::default(),
    };

    users.push(user.clone());
    store.save_users(&users)?;

    info!("Registered {role} account {username}");

    Ok(user)
}
