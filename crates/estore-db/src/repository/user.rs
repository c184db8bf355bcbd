//! User repository.
//!
//! Usernames are unique across the collection; ids are `U` + 8 hex chars.

use tracing::debug;

use super::{generate_id, Record, Repository};
use crate::collection::Collection;
use crate::error::{DbError, DbResult};
use crate::store::Mutation;
use estore_core::Actor;

impl Record for Actor {
    const COLLECTION: Collection = Collection::Users;
    const ENTITY: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Repository<Actor> {
    pub fn get_by_username(&self, username: &str) -> Option<Actor> {
        self.list().into_iter().find(|a| a.username == username)
    }

    /// Appends `actor` unless its username is taken.
    pub fn register(&self, actor: &Actor) -> DbResult<()> {
        debug!(username = %actor.username, "Registering user");
        self.database()
            .modify(Collection::Users, |users: &mut Vec<Actor>| {
                if users.iter().any(|u| u.username == actor.username) {
                    return Mutation::Discard(Err(DbError::duplicate(
                        "username",
                        &actor.username,
                    )));
                }
                users.push(actor.clone());
                Mutation::Commit(Ok(()))
            })?
    }

    /// Replaces the stored account with `actor`'s id, unless another
    /// account already uses its username.
    pub fn update_unique(&self, actor: &Actor) -> DbResult<()> {
        debug!(id = %actor.id, username = %actor.username, "Updating user");
        self.database()
            .modify(Collection::Users, |users: &mut Vec<Actor>| {
                if users
                    .iter()
                    .any(|u| u.username == actor.username && u.id != actor.id)
                {
                    return Mutation::Discard(Err(DbError::duplicate(
                        "username",
                        &actor.username,
                    )));
                }
                match users.iter_mut().find(|u| u.id == actor.id) {
                    Some(slot) => {
                        *slot = actor.clone();
                        Mutation::Commit(Ok(()))
                    }
                    None => Mutation::Discard(Err(DbError::not_found(Actor::ENTITY, &actor.id))),
                }
            })?
    }
}

/// Helper to generate a new user ID (`U` + 8 hex chars).
pub fn generate_user_id() -> String {
    generate_id('U')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use estore_core::Role;

    fn actor(username: &str) -> Actor {
        Actor {
            id: generate_user_id(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            name: username.to_string(),
            email: String::new(),
            phone: String::new(),
            active: true,
            role: Role::Administrator,
        }
    }

    #[test]
    fn test_register_rejects_duplicate_username() {
        let db = Database::in_memory();
        db.users().register(&actor("admin")).unwrap();
        assert!(matches!(
            db.users().register(&actor("admin")),
            Err(DbError::Duplicate { .. })
        ));
        assert_eq!(db.users().count(), 1);
        assert!(db.users().get_by_username("admin").is_some());
        assert!(db.users().get_by_username("nobody").is_none());
    }

    #[test]
    fn test_update_unique_keeps_usernames_distinct() {
        let db = Database::in_memory();
        let users = db.users();
        let admin = actor("admin");
        let mut clerk = actor("clerk");
        users.register(&admin).unwrap();
        users.register(&clerk).unwrap();

        // Keeping one's own username is not a clash.
        clerk.email = "clerk@store.test".to_string();
        users.update_unique(&clerk).unwrap();

        clerk.username = "admin".to_string();
        assert!(matches!(
            users.update_unique(&clerk),
            Err(DbError::Duplicate { .. })
        ));
        let stored = users.get_by_id(&clerk.id).unwrap();
        assert_eq!(stored.username, "clerk");
        assert_eq!(stored.email, "clerk@store.test");

        assert!(matches!(
            users.update_unique(&actor("ghost")),
            Err(DbError::NotFound { .. })
        ));
    }
}
