use std::{fs, path::Path};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Role handed to accounts provisioned on first sign-in. Admin is excluded
/// on purpose; the only auto-provisioned admin is the configured address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DefaultRole {
    Client,
    Editor,
}

impl From<DefaultRole> for Role {
    fn from(value: DefaultRole) -> Self {
        match value {
            DefaultRole::Client => Role::Client,
            DefaultRole::Editor => Role::Editor,
        }
    }
}

/// Deployment configuration, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Sign-ins with this address are provisioned as Admin.
    pub admin_email: String,
    pub default_role: DefaultRole,
    /// Populate an empty workspace with demo data on first launch.
    pub seed_demo_data: bool,
    /// How many upcoming deadlines the dashboard previews.
    pub upcoming_preview: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_email: "admin@atelier.local".to_string(),
            default_role: DefaultRole::Editor,
            seed_demo_data: true,
            upcoming_preview: 4,
        }
    }
}

impl Config {
    /// Reads the config file if present; a missing or unreadable file falls
    /// back to defaults rather than blocking startup.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed config {}: {err}", path.display());
                Self::default()
            }),
            Err(err) => {
                warn!("Failed to read config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn role_for(&self, email: &str) -> Role {
        if email.eq_ignore_ascii_case(&self.admin_email) {
            Role::Admin
        } else {
            self.default_role.into()
        }
    }
}
