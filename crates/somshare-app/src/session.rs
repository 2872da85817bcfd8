//! Session context: the single owner of the credential and the cached
//! profile, persisted to disk so a restart can resume the session.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use somshare_types::models::UserInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    /// Signed up, profile setup not yet completed.
    ProfileIncomplete,
    Authenticated,
    LoggingOut,
}

/// On-disk form. Only written while a credential exists.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    email: String,
    #[serde(default)]
    profile: Option<UserInfo>,
}

pub struct SessionContext {
    path: PathBuf,
    pub state: SessionState,
    token: Option<String>,
    email: Option<String>,
    profile: Option<UserInfo>,
}

impl SessionContext {
    /// Load whatever the last run left behind. A missing or unreadable
    /// file is just an anonymous start.
    pub fn load(path: PathBuf) -> Self {
        let stored: Option<StoredSession> = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok());

        match stored {
            Some(s) => {
                debug!(email = %s.email, "restored stored session");
                Self {
                    path,
                    state: SessionState::Anonymous, // authenticated only after re-validation
                    token: Some(s.token),
                    email: Some(s.email),
                    profile: s.profile,
                }
            }
            None => Self {
                path,
                state: SessionState::Anonymous,
                token: None,
                email: None,
                profile: None,
            },
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn profile(&self) -> Option<&UserInfo> {
        self.profile.as_ref()
    }

    pub fn points(&self) -> Option<i64> {
        self.profile.as_ref().map(|p| p.points)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    pub fn begin_login(&mut self, email: &str) {
        self.state = SessionState::Authenticating;
        self.email = Some(email.to_string());
    }

    /// Failed login: drop the attempted identity and return to
    /// anonymous, restoring whatever email was held before the attempt.
    pub fn abort_login(&mut self, prior_email: Option<String>) {
        self.email = prior_email;
        self.state = SessionState::Anonymous;
    }

    /// Successful login: hold the credential and move to authenticated.
    pub fn complete_login(&mut self, token: String, profile: Option<UserInfo>) {
        self.token = Some(token);
        self.profile = profile;
        self.state = SessionState::Authenticated;
        self.save();
    }

    /// Successful signup: a profile is still owed.
    pub fn enter_profile_setup(&mut self, email: &str) {
        self.email = Some(email.to_string());
        self.state = SessionState::ProfileIncomplete;
    }

    pub fn set_profile(&mut self, profile: UserInfo) {
        self.email = Some(profile.email.clone());
        self.profile = Some(profile);
        if self.state == SessionState::ProfileIncomplete {
            self.state = SessionState::Authenticated;
        }
        self.save();
    }

    /// Replace the cached balance with the server-reported one.
    pub fn set_points(&mut self, points: i64) {
        if let Some(profile) = self.profile.as_mut() {
            profile.points = points;
            self.save();
        }
    }

    /// Mirror the session to disk. Persistence failures are logged and
    /// otherwise ignored; the in-memory session stays the truth.
    pub fn save(&self) {
        let Some(token) = &self.token else { return };
        let Some(email) = &self.email else { return };
        let stored = StoredSession {
            token: token.clone(),
            email: email.clone(),
            profile: self.profile.clone(),
        };
        if let Err(e) = self.write_stored(&stored) {
            warn!("failed to persist session: {}", e);
        }
    }

    fn write_stored(&self, stored: &StoredSession) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(stored).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }

    /// Drop credential, profile cache, and the state file. Runs the
    /// same whether or not server-side invalidation succeeded.
    pub fn clear(&mut self) {
        self.token = None;
        self.email = None;
        self.profile = None;
        self.state = SessionState::Anonymous;
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("failed to remove session file: {}", e);
            }
        }
    }
}
