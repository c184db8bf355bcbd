//! # Session Authority
//!
//! Who is logged in, since when, and what they may do.
//!
//! A [`Session`] is an ordinary value handed to each service call. Nothing
//! in the back office reads a global "current user"; two sessions can exist
//! side by side (tests do this routinely).
//!
//! ```text
//! ┌───────────────┐  start(actor)   ┌────────────────────────────────┐
//! │  Logged out   │ ──────────────► │  Logged in                     │
//! │  actor: None  │                 │  actor, login_time, "main"     │
//! │               │ ◄────────────── │                                │
//! └───────────────┘  end()          └────────────────────────────────┘
//!                    (logout hook)     start(other) replaces in place
//! ```

use chrono::{DateTime, Local};

use crate::types::{Actor, RoleKind};
use crate::DEFAULT_SECTION;

/// The single authenticated actor of a front end, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    actor: Option<Actor>,
    login_time: Option<DateTime<Local>>,
    current_section: Option<String>,
}

impl Session {
    /// An empty (logged-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `actor`, replacing any previous session without calling its
    /// logout hook.
    pub fn start(&mut self, actor: Actor) {
        self.actor = Some(actor);
        self.login_time = Some(Local::now());
        self.current_section = Some(DEFAULT_SECTION.to_string());
    }

    /// Runs the bound actor's logout hook and clears every field.
    pub fn end(&mut self) {
        if let Some(actor) = self.actor.take() {
            actor.on_logout();
        }
        self.login_time = None;
        self.current_section = None;
    }

    #[inline]
    pub fn is_logged_in(&self) -> bool {
        self.actor.is_some()
    }

    #[inline]
    pub fn is_cashier(&self) -> bool {
        self.role() == Some(RoleKind::Cashier)
    }

    #[inline]
    pub fn is_manager(&self) -> bool {
        self.role() == Some(RoleKind::Manager)
    }

    #[inline]
    pub fn is_administrator(&self) -> bool {
        self.role() == Some(RoleKind::Administrator)
    }

    pub fn role(&self) -> Option<RoleKind> {
        self.actor.as_ref().map(Actor::role_kind)
    }

    pub fn current_actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    pub fn login_time(&self) -> Option<DateTime<Local>> {
        self.login_time
    }

    pub fn current_section(&self) -> Option<&str> {
        self.current_section.as_deref()
    }

    /// Moves the section marker. Ignored while logged out.
    pub fn set_current_section(&mut self, section: impl Into<String>) {
        if self.actor.is_some() {
            self.current_section = Some(section.into());
        }
    }

    /// One-line description for status bars and logs.
    pub fn summary(&self) -> String {
        match (&self.actor, self.login_time) {
            (Some(actor), Some(at)) => format!(
                "{} ({}) logged in at {} [section: {}]",
                actor.username,
                actor.role_kind(),
                at.format("%Y-%m-%d %H:%M:%S"),
                self.current_section.as_deref().unwrap_or(DEFAULT_SECTION)
            ),
            _ => "No active session".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
