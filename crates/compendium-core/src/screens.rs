//! Screen registry for presentation hosts.
//!
//! The registry is an explicit object owned by the host; there is no global
//! list of screens. It tracks which screen is shown and produces the
//! transitions a host has to animate.
//!
//! Requirements:
//! - stable ordering for iteration
//! - clear errors for unknown screens
//! - exactly zero or one screen shown at a time

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{CompendiumError, CompendiumResult};

/// Prefix of a screen's DOM element id.
pub const SCREEN_DOM_ID_PREFIX: &str = "screen-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenId {
    Loading,
    Home,
    Crash,
    Browse,
    Search,
    Compare,
}

impl ScreenId {
    pub const ALL: [ScreenId; 6] = [
        ScreenId::Loading,
        ScreenId::Home,
        ScreenId::Crash,
        ScreenId::Browse,
        ScreenId::Search,
        ScreenId::Compare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Home => "home",
            Self::Crash => "crash",
            Self::Browse => "browse",
            Self::Search => "search",
            Self::Compare => "compare",
        }
    }

    /// Id of the DOM element rendering this screen (`screen-home`).
    pub fn html_id(&self) -> String {
        format!("{SCREEN_DOM_ID_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenId {
    type Err = CompendiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CompendiumError::not_found("screen", s))
    }
}

/// A registered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub id: ScreenId,
    pub hidden: bool,
}

/// Result of a screen change, for the host to animate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenTransition {
    pub hidden: Option<ScreenId>,
    pub shown: ScreenId,
}

#[derive(Debug, Default)]
pub struct ScreenRegistry {
    screens: Vec<Screen>,
    crash_message: Option<String>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every screen, all hidden.
    pub fn with_all_screens() -> Self {
        let mut reg = Self::new();
        for id in ScreenId::ALL {
            reg.register(id);
        }
        reg
    }

    /// Register a hidden screen. Returns false if the id is already registered.
    pub fn register(&mut self, id: ScreenId) -> bool {
        if self.get(id).is_some() {
            return false;
        }
        self.screens.push(Screen { id, hidden: true });
        true
    }

    pub fn get(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id == id)
    }

    /// Look up a screen by its textual id, as found in navigation targets.
    pub fn get_by_name(&self, name: &str) -> CompendiumResult<&Screen> {
        let id: ScreenId = name.parse()?;
        self.get(id)
            .ok_or_else(|| CompendiumError::not_found("screen", name))
    }

    /// The first screen currently shown.
    pub fn current(&self) -> Option<ScreenId> {
        self.screens.iter().find(|s| !s.hidden).map(|s| s.id)
    }

    pub fn crash_message(&self) -> Option<&str> {
        self.crash_message.as_deref()
    }

    /// Hide the current screen and show `id`.
    pub fn change_screen(&mut self, id: ScreenId) -> CompendiumResult<ScreenTransition> {
        if self.get(id).is_none() {
            return Err(CompendiumError::not_found("screen", id.as_str()));
        }

        let hidden = self.current();
        for s in &mut self.screens {
            s.hidden = s.id != id;
        }

        tracing::debug!(from = ?hidden, to = %id, "screen changed");
        Ok(ScreenTransition { hidden, shown: id })
    }

    /// Hide every screen and show the crash screen with `message`.
    pub fn crash(&mut self, message: impl Into<String>) -> CompendiumResult<ScreenTransition> {
        self.crash_message = Some(message.into());
        self.change_screen(ScreenId::Crash)
    }
}
