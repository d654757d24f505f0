use thiserror::Error;

pub mod locate;
pub mod patch;

#[cfg(windows)]
pub use locate::SteamRegistryLocator;
pub use locate::{default_locator, EnvLocator, FixedLocator, InstallLocator};
pub use patch::{PatchProfile, PatchTarget, Tier};

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Steam installation path was not found.")]
    NotFound,
    #[error("Could not access the installation lookup. {0}")]
    Access(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Could not locate the game installation. {0}")]
    Locate(#[from] LocateError),
    #[error("Failed reading or writing the game executable. {0}")]
    Io(#[from] std::io::Error),
}
