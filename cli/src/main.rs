use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use patcher::{default_locator, FixedLocator, InstallLocator, PatchProfile};

#[derive(Parser, Debug)]
#[command(name = "robe-patcher-cli")]
#[command(version)]
/// Patch the robe color tier stored inside Journey.exe.
///
/// IMPORTANT:
/// Close the game before writing. The tier value is mirrored at two file
/// offsets and both are rewritten on every set; a crash mid-write can leave
/// them inconsistent.
struct Args {
    #[arg(short)]
    #[arg(long)]
    /// The tier value to write. Omit to just print the current tier
    set: Option<u32>,

    #[arg(short = 'y')]
    #[arg(long)]
    /// Skip the confirmation prompt
    yes: bool,

    #[arg(long)]
    /// Use this installation root instead of the Steam registry lookup
    install_root: Option<PathBuf>,

    #[arg(long)]
    /// Load the patch profile (executable path, offsets, tiers) from a JSON file
    profile: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let profile: PatchProfile = match &args.profile {
        Some(path) => serde_json::from_slice(&fs::read(path)?)?,
        None => PatchProfile::journey(),
    };

    let locator: Box<dyn InstallLocator> = match &args.install_root {
        Some(root) => Box::new(FixedLocator::new(root.clone())),
        None => default_locator(),
    };

    let target = profile.resolve(locator.as_ref())?;
    println!("Target: {}", target.path().display());

    let current = target.current_value()?;
    match profile.tier_name(current) {
        Some(name) => println!("Current: {name} (value {current})"),
        None => println!("Current: value {current} (not in the tier table)"),
    }

    let Some(value) = args.set else {
        return Ok(());
    };

    let label = match profile.tier_name(value) {
        Some(name) => name.to_string(),
        None => {
            eprintln!("Warning: {value} is not in the tier table; writing it anyway.");
            format!("value {value}")
        }
    };

    if !args.yes && !confirm(&format!("Do you want to set {label}?"))? {
        println!("Aborted.");
        return Ok(());
    }

    target.write_value(value)?;
    println!("Set {label}.");

    Ok(())
}

fn confirm(question: &str) -> Result<bool, Box<dyn Error>> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
