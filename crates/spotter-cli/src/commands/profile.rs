//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::PathBuf;

/// Execute the profile command.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set { name, opl, ipf } => set_profile(config, name, opl, ipf, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles, marking the active one.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    for (name, profile) in &config.profiles {
        if *name == config.active_profile {
            println!("{}", formatter.success(&format!("{} (active)", name)));
        } else {
            println!("  {}", name);
        }
        println!("    opl: {}", profile.opl_db.display());
        println!("    ipf: {}", profile.ipf_db.display());
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.active()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    for (label, path) in [("OpenPowerlifting", &profile.opl_db), ("OpenIPF", &profile.ipf_db)] {
        let status = if path.exists() { "" } else { " (missing)" };
        println!("  {}: {}{}", label, path.display(), status);
    }

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    opl: String,
    ipf: String,
    formatter: &Formatter,
) -> Result<()> {
    if opl.trim().is_empty() || ipf.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Both database paths are required".to_string(),
        ));
    }
    let profile = Profile {
        opl_db: PathBuf::from(opl),
        ipf_db: PathBuf::from(ipf),
    };

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}
