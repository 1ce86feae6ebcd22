//! Profile lookup for the option engine.
//!
//! Options such as `--profile` name a profile the way a user would type it;
//! the options tree records the stable identifier instead. The engine only
//! sees the [`ProfileResolver`] trait, so callers may plug in whatever
//! profile store they have. The stock implementation is the YAML-backed
//! [`ProfileManager`] loaded by [`storage`].
//!
//! Profiles are stored in `~/.config/term-launch/profiles.yaml`.

pub mod storage;

pub use term_launch_config::{Profile, ProfileId, ProfileManager};

/// Errors from profile resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// No profile matches the given name or identifier.
    #[error("No such profile “{0}”")]
    NotFound(String),

    /// No name was given and the store has no profile to fall back to.
    #[error("No default profile is configured")]
    NoDefaultProfile,

    /// The value is not syntactically a profile identifier.
    #[error("“{0}” is not a valid profile identifier")]
    InvalidId(String),
}

impl ProfileError {
    /// Whether this error allows falling back to the default profile
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::NotFound(_))
    }
}

/// Resolves user-supplied profile references to profile identifiers.
pub trait ProfileResolver {
    /// Resolve a profile by identifier or name; `None` asks for the default
    /// profile.
    fn resolve(&self, name: Option<&str>) -> Result<String, ProfileError>;

    /// Resolve strictly by identifier, with no name matching.
    fn resolve_id(&self, id: &str) -> Result<String, ProfileError>;
}

impl ProfileResolver for ProfileManager {
    fn resolve(&self, name: Option<&str>) -> Result<String, ProfileError> {
        let profile = match name {
            Some(name) => self
                .find_by_id_str(name)
                .or_else(|| self.find_by_name(name))
                .ok_or_else(|| ProfileError::NotFound(name.to_string()))?,
            None => self
                .default_profile()
                .ok_or(ProfileError::NoDefaultProfile)?,
        };
        log::debug!("Resolved profile {:?} to {}", name, profile.id);
        Ok(profile.id_string())
    }

    fn resolve_id(&self, id: &str) -> Result<String, ProfileError> {
        let uuid = uuid::Uuid::parse_str(id.trim())
            .map_err(|_| ProfileError::InvalidId(id.to_string()))?;
        self.get(&uuid)
            .map(Profile::id_string)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))
    }
}
