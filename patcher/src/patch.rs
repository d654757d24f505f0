use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::locate::InstallLocator;
use crate::PatchError;

/// One selectable robe variant. `value` is the raw integer that goes into
/// the executable; the on-disk value v selects in-game robe tier v + 1,
/// hence the shifted display names in the built-in profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub value: u32,
    pub name: String,
}

/// The game-specific constants: where the executable sits under the
/// installation root, which offsets mirror the tier value, and which tiers
/// are selectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchProfile {
    pub executable: PathBuf,
    pub offsets: Vec<u64>,
    pub tiers: Vec<Tier>,
}

impl PatchProfile {
    /// The built-in Journey profile. The tier value is mirrored at two
    /// offsets inside `Journey.exe`; both must be rewritten for a change to
    /// take effect.
    pub fn journey() -> Self {
        Self {
            executable: ["SteamApps", "common", "Journey", "Journey.exe"]
                .iter()
                .collect(),
            offsets: vec![0x161D7F, 0x2169F7],
            tiers: vec![
                Tier { value: 1, name: String::from("Tier 2") },
                Tier { value: 2, name: String::from("Tier 3") },
                Tier { value: 3, name: String::from("Tier 4") },
            ],
        }
    }

    /// Joins the locator's installation root with the relative executable
    /// path. Does not check that the file actually exists.
    pub fn resolve(&self, locator: &dyn InstallLocator) -> Result<PatchTarget, PatchError> {
        let root = locator.install_root()?;
        Ok(PatchTarget {
            path: root.join(&self.executable),
            offsets: self.offsets.clone(),
        })
    }

    pub fn tier_name(&self, value: u32) -> Option<&str> {
        self.tiers
            .iter()
            .find(|t| t.value == value)
            .map(|t| t.name.as_str())
    }
}

/// A resolved executable path plus the offsets that must be kept mutually
/// consistent. Every operation opens its own file handle and drops it when
/// done.
#[derive(Debug, Clone)]
pub struct PatchTarget {
    path: PathBuf,
    offsets: Vec<u64>,
}

impl PatchTarget {
    pub fn new(path: impl Into<PathBuf>, offsets: Vec<u64>) -> Self {
        Self { path: path.into(), offsets }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Reads the 4-byte little-endian value at `offset`.
    pub fn read_value(&self, offset: u64) -> Result<u32, PatchError> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = [0u8; 4];
        file.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Reads the value at the first offset. After a successful write all
    /// offsets agree, so one read is enough to report the active tier.
    pub fn current_value(&self) -> Result<u32, PatchError> {
        match self.offsets.first() {
            Some(&offset) => self.read_value(offset),
            None => Err(PatchError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "patch target has no offsets",
            ))),
        }
    }

    /// Writes `value` little-endian at every offset, in order. The writes
    /// are sequential and not atomic across offsets; the game must not have
    /// the file open. No range validation happens here.
    pub fn write_value(&self, value: u32) -> Result<(), PatchError> {
        let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let data = value.to_le_bytes();
        for &offset in &self.offsets {
            file.seek(SeekFrom::Start(offset))?;
            file.write_all(&data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::FixedLocator;
    use crate::LocateError;
    use std::fs;

    struct BrokenLocator;

    impl InstallLocator for BrokenLocator {
        fn install_root(&self) -> Result<PathBuf, LocateError> {
            Err(LocateError::NotFound)
        }
    }

    fn scratch_target(name: &str, len: usize, offsets: Vec<u64>) -> PatchTarget {
        let path = std::env::temp_dir().join(format!(
            "robe_patcher_{}_{}",
            name,
            std::process::id()
        ));
        fs::write(&path, vec![0u8; len]).expect("create scratch file");
        PatchTarget::new(path, offsets)
    }

    fn cleanup(target: &PatchTarget) {
        let _ = fs::remove_file(target.path());
    }

    #[test]
    fn round_trip_every_tier() {
        let target = scratch_target("round_trip", 512, vec![16, 300]);
        for tier in PatchProfile::journey().tiers {
            target.write_value(tier.value).expect("write");
            for &offset in target.offsets() {
                assert_eq!(target.read_value(offset).expect("read"), tier.value);
            }
        }
        cleanup(&target);
    }

    #[test]
    fn writing_twice_is_idempotent() {
        let target = scratch_target("idempotent", 512, vec![16, 300]);
        target.write_value(3).expect("first write");
        let once = fs::read(target.path()).expect("snapshot");
        target.write_value(3).expect("second write");
        assert_eq!(fs::read(target.path()).expect("snapshot"), once);
        cleanup(&target);
    }

    #[test]
    fn mirrored_offsets_stay_consistent() {
        let target = scratch_target("mirrored", 512, vec![100, 200]);

        target.write_value(2).expect("write 2");
        assert_eq!(target.read_value(100).expect("read"), 2);
        assert_eq!(target.read_value(200).expect("read"), 2);
        assert_eq!(target.current_value().expect("current"), 2);

        target.write_value(1).expect("write 1");
        assert_eq!(target.read_value(100).expect("read"), 1);
        assert_eq!(target.read_value(200).expect("read"), 1);

        cleanup(&target);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let target = scratch_target("boundary", 512, vec![64]);
        target.write_value(0xDEADBEEF).expect("write");
        assert_eq!(target.read_value(64).expect("read"), 0xDEADBEEF);
        cleanup(&target);
    }

    #[test]
    fn truncated_file_fails_to_read() {
        let target = scratch_target("truncated", 6, vec![4]);
        assert!(matches!(target.read_value(4), Err(PatchError::Io(_))));
        cleanup(&target);
    }

    #[test]
    fn missing_file_fails_both_ways() {
        let path = std::env::temp_dir().join(format!(
            "robe_patcher_missing_{}",
            std::process::id()
        ));
        let target = PatchTarget::new(path, vec![0]);
        assert!(matches!(target.read_value(0), Err(PatchError::Io(_))));
        assert!(matches!(target.write_value(1), Err(PatchError::Io(_))));
    }

    #[test]
    fn resolve_joins_root_and_executable() {
        let profile = PatchProfile::journey();
        let target = profile
            .resolve(&FixedLocator::new("steam_root"))
            .expect("resolve");
        assert!(target.path().starts_with("steam_root"));
        assert!(target.path().ends_with("Journey.exe"));
        assert_eq!(target.offsets(), profile.offsets.as_slice());
    }

    #[test]
    fn failed_lookup_attempts_no_file_operation() {
        let err = PatchProfile::journey().resolve(&BrokenLocator).unwrap_err();
        assert!(matches!(err, PatchError::Locate(LocateError::NotFound)));
    }

    #[test]
    fn tier_names_follow_the_shifted_mapping() {
        let profile = PatchProfile::journey();
        assert_eq!(profile.tier_name(1), Some("Tier 2"));
        assert_eq!(profile.tier_name(3), Some("Tier 4"));
        assert_eq!(profile.tier_name(9), None);
    }
}
