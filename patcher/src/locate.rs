use std::env;
use std::path::PathBuf;

use crate::LocateError;

/// Environment variable consulted by the default locator on platforms
/// without a Steam registry.
pub const STEAM_ROOT_VAR: &str = "STEAM_ROOT";

/// Single seam for the installation-root lookup so alternate platforms can
/// supply a different mechanism.
pub trait InstallLocator {
    fn install_root(&self) -> Result<PathBuf, LocateError>;
}

/// Queries `HKEY_CURRENT_USER\SOFTWARE\Valve\Steam` for the `SteamPath`
/// string value.
#[cfg(windows)]
pub struct SteamRegistryLocator;

#[cfg(windows)]
impl InstallLocator for SteamRegistryLocator {
    fn install_root(&self) -> Result<PathBuf, LocateError> {
        use winreg::enums::HKEY_CURRENT_USER;
        use winreg::RegKey;

        let steam = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("SOFTWARE\\Valve\\Steam")
            .map_err(classify)?;
        let root: String = steam.get_value("SteamPath").map_err(classify)?;
        Ok(PathBuf::from(root))
    }
}

#[cfg(windows)]
fn classify(err: std::io::Error) -> LocateError {
    match err.kind() {
        std::io::ErrorKind::NotFound => LocateError::NotFound,
        _ => LocateError::Access(err),
    }
}

/// Reads the installation root from an environment variable.
pub struct EnvLocator {
    var: String,
}

impl EnvLocator {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl InstallLocator for EnvLocator {
    fn install_root(&self) -> Result<PathBuf, LocateError> {
        match env::var(&self.var) {
            Ok(root) => Ok(PathBuf::from(root)),
            Err(env::VarError::NotPresent) => Err(LocateError::NotFound),
            Err(env::VarError::NotUnicode(_)) => Err(LocateError::Access(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "environment variable is not valid unicode",
            ))),
        }
    }
}

/// Always answers with the same root. Backs the CLI's `--install-root`
/// override.
pub struct FixedLocator {
    root: PathBuf,
}

impl FixedLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl InstallLocator for FixedLocator {
    fn install_root(&self) -> Result<PathBuf, LocateError> {
        Ok(self.root.clone())
    }
}

/// The lookup mechanism for the current platform.
pub fn default_locator() -> Box<dyn InstallLocator> {
    #[cfg(windows)]
    {
        Box::new(SteamRegistryLocator)
    }
    #[cfg(not(windows))]
    {
        Box::new(EnvLocator::new(STEAM_ROOT_VAR))
    }
}
