//! Profile types and the manager used to resolve profile names.
//!
//! A profile here is only an identity: the launcher never applies profile
//! settings itself, it just resolves what the user typed into a stable id
//! that the consumer of the options tree understands.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a profile
pub type ProfileId = Uuid;

/// A named terminal profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier for this profile
    pub id: ProfileId,

    /// Display name for the profile
    pub name: String,

    /// Whether this is the user's default profile
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,

    /// Display order in the profile list
    #[serde(default)]
    pub order: usize,
}

impl Profile {
    /// Create a new profile with a random id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create a profile with a known id
    pub fn with_id(id: ProfileId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default: false,
            order: 0,
        }
    }

    /// Builder: mark as the default profile
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Builder: set the display order
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// The id in the hyphenated string form used on the command line and in
    /// persisted documents
    pub fn id_string(&self) -> String {
        self.id.hyphenated().to_string()
    }
}

/// Manages a collection of profiles
#[derive(Debug, Clone, Default)]
pub struct ProfileManager {
    /// All profiles indexed by ID
    profiles: HashMap<ProfileId, Profile>,

    /// Ordered list of profile IDs for display
    order: Vec<ProfileId>,
}

impl ProfileManager {
    /// Create a new empty profile manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile manager from a list of profiles
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        let mut manager = Self::new();
        for profile in profiles {
            manager.add(profile);
        }
        manager.sort_by_order();
        manager
    }

    /// Add a profile, replacing any profile with the same id
    pub fn add(&mut self, profile: Profile) {
        let id = profile.id;
        if !self.order.contains(&id) {
            self.order.push(id);
        }
        self.profiles.insert(id, profile);
    }

    /// Get a profile by ID
    pub fn get(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.get(id)
    }

    /// Get all profiles in display order
    pub fn profiles_ordered(&self) -> Vec<&Profile> {
        self.order
            .iter()
            .filter_map(|id| self.profiles.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn sort_by_order(&mut self) {
        self.order
            .sort_by_key(|id| self.profiles.get(id).map(|p| p.order).unwrap_or(usize::MAX));
    }

    /// Find a profile by its id string (any form `Uuid::parse_str` accepts)
    pub fn find_by_id_str(&self, id: &str) -> Option<&Profile> {
        Uuid::parse_str(id.trim())
            .ok()
            .and_then(|uuid| self.profiles.get(&uuid))
    }

    /// Find a profile by name (case-insensitive); the first in display order
    /// wins when names collide
    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        let lower = name.to_lowercase();
        self.profiles_ordered()
            .into_iter()
            .find(|p| p.name.to_lowercase() == lower)
    }

    /// The profile used when none is named: the one flagged `default`, else
    /// the first in display order
    pub fn default_profile(&self) -> Option<&Profile> {
        let ordered = self.profiles_ordered();
        ordered
            .iter()
            .find(|p| p.default)
            .or_else(|| ordered.first())
            .copied()
    }
}
