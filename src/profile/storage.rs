//! Storage utilities for profile persistence
//!
//! Profiles are stored as a YAML list in `~/.config/term-launch/profiles.yaml`
//! (or wherever the launcher config's `profiles_file` points).

use super::{Profile, ProfileManager};
use anyhow::{Context, Result};
use std::path::Path;
use term_launch_config::Config;

/// Load profiles from the location named by the launcher config
pub fn load_profiles(config: &Config) -> Result<ProfileManager> {
    load_profiles_from(&config.profiles_path())
}

/// Load profiles from a specific file
///
/// A missing or empty file yields an empty manager.
pub fn load_profiles_from(path: &Path) -> Result<ProfileManager> {
    log::info!("Loading profiles from {:?}", path);
    if !path.exists() {
        log::info!("No profiles file found at {:?}, starting with empty profiles", path);
        return Ok(ProfileManager::new());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profiles from {:?}", path))?;

    if contents.trim().is_empty() {
        log::info!("Profiles file is empty, starting with empty profiles");
        return Ok(ProfileManager::new());
    }

    let profiles: Vec<Profile> = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse profiles from {:?}", path))?;

    log::debug!("Parsed {} profiles from {:?}", profiles.len(), path);
    for p in &profiles {
        log::debug!("  - {}: {}", p.id, p.name);
    }
    Ok(ProfileManager::from_profiles(profiles))
}
