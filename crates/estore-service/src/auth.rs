//! # Authentication Service
//!
//! Login, logout, password changes and operator administration.
//!
//! ## Who May Do What
//! ```text
//! ┌───────────────────────────┬───────────────────────────────────────────┐
//! │ Operation                 │ Allowed                                   │
//! ├───────────────────────────┼───────────────────────────────────────────┤
//! │ login / logout            │ anyone                                    │
//! │ change_password           │ the logged-in actor, for itself           │
//! │ register_user             │ cashier and manager accounts: anyone;     │
//! │                           │ administrator accounts: anyone while no   │
//! │                           │ user exists, afterwards Administrator     │
//! │ list / update / delete    │ Administrator (never on itself for        │
//! │ activate / reset_password │ delete and deactivate)                    │
//! └───────────────────────────┴───────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::guard::{report, require_login, require_role};
use crate::password::{hash_password, verify_password};
use estore_core::validation::{validate_name, validate_password, validate_username};
use estore_core::{Actor, Role, RoleKind, Session};
use estore_db::repository::generate_user_id;
use estore_db::{Database, Repository};

/// Input for creating an operator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    /// Plain password; only its hash is stored.
    pub password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

/// Editable account details. The password and activation have their own
/// operations; `sector` applies to cashiers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub sector: Option<String>,
}

/// Operator accounts and the session binding.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Repository<Actor>,
    min_password_len: usize,
    default_reset_password: String,
}

impl AuthService {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        AuthService {
            users: db.users(),
            min_password_len: config.min_password_len,
            default_reset_password: config.default_reset_password.clone(),
        }
    }

    // =========================================================================
    // Session binding
    // =========================================================================

    /// Verifies the credentials and, on success, binds the actor to
    /// `session` (replacing whoever was bound).
    pub fn login(&self, session: &mut Session, username: &str, password: &str) -> bool {
        match self.authenticate(username, password) {
            Ok(actor) => {
                info!(username = %actor.username, role = %actor.role_kind(), "Login");
                session.start(actor);
                true
            }
            Err(e) => report("login", Err::<(), _>(e)),
        }
    }

    fn authenticate(&self, username: &str, password: &str) -> ServiceResult<Actor> {
        let invalid = || ServiceError::InvalidCredentials(username.to_string());
        let actor = self.users.get_by_username(username).ok_or_else(invalid)?;
        if !actor.active || !verify_password(password, &actor.password_hash) {
            return Err(invalid());
        }
        Ok(actor)
    }

    /// Ends the session if one is bound.
    pub fn logout(&self, session: &mut Session) {
        if session.is_logged_in() {
            session.end();
        }
    }

    /// Changes the logged-in actor's own password.
    pub fn change_password(&self, session: &Session, old: &str, new: &str) -> bool {
        report("change_password", self.try_change_password(session, old, new))
    }

    fn try_change_password(&self, session: &Session, old: &str, new: &str) -> ServiceResult<()> {
        let bound = require_login(session)?;
        let mut actor = self
            .users
            .get_by_id(&bound.id)
            .ok_or_else(|| ServiceError::not_found("User", &bound.id))?;
        if !verify_password(old, &actor.password_hash) {
            return Err(ServiceError::InvalidCredentials(actor.username));
        }
        validate_password(new, self.min_password_len)?;
        actor.password_hash = hash_password(new)?;
        self.users.update(&actor)?;
        info!(username = %actor.username, "Password changed");
        Ok(())
    }

    // =========================================================================
    // User administration
    // =========================================================================

    /// Creates an account. Cashier and manager accounts may be created by
    /// anyone. An administrator account needs an administrator session once
    /// any user exists.
    pub fn register_user(&self, session: &Session, new: NewUser) -> bool {
        report("register_user", self.try_register_user(session, new))
    }

    fn try_register_user(&self, session: &Session, new: NewUser) -> ServiceResult<Actor> {
        if new.role.kind() == RoleKind::Administrator && self.users.count() > 0 {
            require_role(session, RoleKind::Administrator)?;
        }
        validate_username(&new.username)?;
        validate_password(&new.password, self.min_password_len)?;
        validate_name("name", &new.name)?;

        let actor = Actor {
            id: generate_user_id(),
            username: new.username.trim().to_string(),
            password_hash: hash_password(&new.password)?,
            name: new.name,
            email: new.email,
            phone: new.phone,
            active: true,
            role: new.role,
        };
        self.users.register(&actor)?;
        info!(username = %actor.username, role = %actor.role_kind(), "User registered");
        Ok(actor)
    }

    /// All accounts. Empty unless an administrator is logged in.
    pub fn list_users(&self, session: &Session) -> Vec<Actor> {
        match require_role(session, RoleKind::Administrator) {
            Ok(_) => self.users.list(),
            Err(e) => {
                report("list_users", Err::<(), _>(e));
                Vec::new()
            }
        }
    }

    /// Accounts holding `role`. Empty unless an administrator is logged in.
    pub fn list_users_by_role(&self, session: &Session, role: RoleKind) -> Vec<Actor> {
        match require_role(session, RoleKind::Administrator) {
            Ok(_) => self
                .users
                .list()
                .into_iter()
                .filter(|a| a.role_kind() == role)
                .collect(),
            Err(e) => {
                report("list_users_by_role", Err::<(), _>(e));
                Vec::new()
            }
        }
    }

    /// Edits an account's details. Usernames stay unique.
    pub fn update_user(&self, session: &Session, user_id: &str, update: UserUpdate) -> bool {
        report("update_user", self.try_update_user(session, user_id, update))
    }

    fn try_update_user(
        &self,
        session: &Session,
        user_id: &str,
        update: UserUpdate,
    ) -> ServiceResult<()> {
        require_role(session, RoleKind::Administrator)?;
        validate_username(&update.username)?;
        validate_name("name", &update.name)?;
        let mut actor = self
            .users
            .get_by_id(user_id)
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        if let Some(sector) = update.sector {
            match &mut actor.role {
                Role::Cashier { sector: current } => {
                    validate_name("sector", &sector)?;
                    *current = sector;
                }
                _ => return Err(ServiceError::NotACashier(actor.username)),
            }
        }
        actor.username = update.username.trim().to_string();
        actor.name = update.name;
        actor.email = update.email;
        actor.phone = update.phone;

        self.users.update_unique(&actor)?;
        info!(user_id = %user_id, username = %actor.username, "User updated");
        Ok(())
    }

    pub fn delete_user(&self, session: &Session, user_id: &str) -> bool {
        report("delete_user", self.try_delete_user(session, user_id))
    }

    fn try_delete_user(&self, session: &Session, user_id: &str) -> ServiceResult<()> {
        let admin = require_role(session, RoleKind::Administrator)?;
        if admin.id == user_id {
            return Err(ServiceError::SelfAction("delete"));
        }
        if !self.users.delete(user_id)? {
            return Err(ServiceError::not_found("User", user_id));
        }
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Activates or deactivates an account. Inactive accounts cannot log in.
    pub fn set_user_active(&self, session: &Session, user_id: &str, active: bool) -> bool {
        report(
            "set_user_active",
            self.try_set_user_active(session, user_id, active),
        )
    }

    fn try_set_user_active(
        &self,
        session: &Session,
        user_id: &str,
        active: bool,
    ) -> ServiceResult<()> {
        let admin = require_role(session, RoleKind::Administrator)?;
        if admin.id == user_id && !active {
            return Err(ServiceError::SelfAction("deactivate"));
        }
        let mut actor = self
            .users
            .get_by_id(user_id)
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        actor.active = active;
        self.users.update(&actor)?;
        info!(user_id = %user_id, active, "User activation changed");
        Ok(())
    }

    /// Resets an account's password to the configured default.
    pub fn reset_password(&self, session: &Session, user_id: &str) -> bool {
        report("reset_password", self.try_reset_password(session, user_id))
    }

    fn try_reset_password(&self, session: &Session, user_id: &str) -> ServiceResult<()> {
        require_role(session, RoleKind::Administrator)?;
        let mut actor = self
            .users
            .get_by_id(user_id)
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        actor.password_hash = hash_password(&self.default_reset_password)?;
        self.users.update(&actor)?;
        info!(user_id = %user_id, "Password reset to default");
        Ok(())
    }
}
