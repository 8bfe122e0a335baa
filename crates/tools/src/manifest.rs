//! Seed manifest for save creation.
//!
//! A save owns a fixed number of map slots. Each slot gets a starting seed
//! derived from the save's base seed; bad attempts are regenerated forward
//! until a good map appears, and the accepted seed is recorded together with
//! a fingerprint of the map. Loading a manifest regenerates every slot and
//! rejects the file if any fingerprint no longer matches.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use seedmap::{ConfigError, GeneratedMap, MapGenConfig, MapGenerator, MapType, find_good_map};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub slot: u32,
    pub requested_seed: u32,
    pub seed: u32,
    pub rerolls: u32,
    pub map_type: u8,
    pub width: usize,
    pub height: usize,
    pub fingerprint: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeedManifest {
    pub format_version: u32,
    pub base_seed: u64,
    /// Mask forced on every slot; `None` lets each slot roll its own.
    pub map_type: Option<u8>,
    pub config: MapGenConfig,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug)]
pub enum ManifestError {
    Io(io::Error),
    Parse(String),
    UnsupportedVersion(u32),
    InvalidConfig(ConfigError),
    NoGoodSeed { slot: u32, requested_seed: u32, attempts: u32 },
    SlotOutOfOrder { index: usize, slot: u32 },
    FingerprintMismatch { slot: u32, expected: String, found: String },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "manifest I/O error: {e}"),
            Self::Parse(message) => write!(f, "invalid manifest JSON: {message}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported manifest format version {version}")
            }
            Self::InvalidConfig(e) => write!(f, "invalid generator config: {e}"),
            Self::NoGoodSeed { slot, requested_seed, attempts } => write!(
                f,
                "slot {slot}: no good map in {attempts} attempts from seed {requested_seed}"
            ),
            Self::SlotOutOfOrder { index, slot } => {
                write!(f, "entry {index} is for slot {slot}")
            }
            Self::FingerprintMismatch { slot, expected, found } => {
                write!(f, "slot {slot}: fingerprint {found} does not match recorded {expected}")
            }
        }
    }
}

impl Error for ManifestError {}

/// Starting seed for `slot`, mixed from the save's base seed.
pub fn derive_slot_seed(base_seed: u64, slot: u32) -> u32 {
    let mut mixed = base_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(slot).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 31;
    (mixed ^ (mixed >> 32)) as u32
}

fn fingerprint_hex(map: &GeneratedMap) -> String {
    format!("{:016x}", map.fingerprint())
}

impl SeedManifest {
    pub fn build(
        config: &MapGenConfig,
        base_seed: u64,
        slots: u32,
        map_type: Option<MapType>,
        max_attempts: u32,
    ) -> Result<Self, ManifestError> {
        let generator =
            MapGenerator::try_new(config.clone()).map_err(ManifestError::InvalidConfig)?;
        let mut entries = Vec::with_capacity(slots as usize);
        for slot in 0..slots {
            let requested_seed = derive_slot_seed(base_seed, slot);
            let found = find_good_map(&generator, requested_seed, map_type, max_attempts).ok_or(
                ManifestError::NoGoodSeed { slot, requested_seed, attempts: max_attempts },
            )?;
            debug!("slot {slot}: seed {} after {} rerolls", found.map.seed, found.discarded);
            entries.push(ManifestEntry {
                slot,
                requested_seed,
                seed: found.map.seed,
                rerolls: found.discarded,
                map_type: found.map.map_type.bits(),
                width: found.map.width,
                height: found.map.height,
                fingerprint: fingerprint_hex(&found.map),
            });
        }
        Ok(Self {
            format_version: FORMAT_VERSION,
            base_seed,
            map_type: map_type.map(MapType::bits),
            config: generator.config().clone(),
            entries,
        })
    }

    fn generator(&self) -> Result<MapGenerator, ManifestError> {
        MapGenerator::try_new(self.config.clone()).map_err(ManifestError::InvalidConfig)
    }

    /// Regenerate the map stored in `slot`.
    pub fn map_for(&self, slot: u32) -> Result<Option<GeneratedMap>, ManifestError> {
        let generator = self.generator()?;
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.slot == slot)
            .map(|entry| generator.generate(entry.seed, self.map_type.map(MapType::new))))
    }

    /// Regenerate every slot and compare against the recorded fingerprints.
    pub fn verify(&self) -> Result<(), ManifestError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ManifestError::UnsupportedVersion(self.format_version));
        }
        let generator = self.generator()?;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.slot as usize != index {
                return Err(ManifestError::SlotOutOfOrder { index, slot: entry.slot });
            }
            let map = generator.generate(entry.seed, self.map_type.map(MapType::new));
            let found = fingerprint_hex(&map);
            if found != entry.fingerprint {
                return Err(ManifestError::FingerprintMismatch {
                    slot: entry.slot,
                    expected: entry.fingerprint.clone(),
                    found,
                });
            }
        }
        info!("verified {} manifest slots", self.entries.len());
        Ok(())
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    /// Read a manifest and verify every slot before handing it out.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(ManifestError::Io)?;
        let manifest: Self =
            serde_json::from_str(&content).map_err(|e| ManifestError::Parse(e.to_string()))?;
        manifest.verify()?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_manifest() -> SeedManifest {
        SeedManifest::build(&MapGenConfig::default(), 2024, 4, None, 32).expect("manifest builds")
    }

    #[test]
    fn slot_seeds_are_stable_and_distinct() {
        assert_eq!(derive_slot_seed(7, 3), derive_slot_seed(7, 3));
        assert_ne!(derive_slot_seed(7, 3), derive_slot_seed(7, 4));
        assert_ne!(derive_slot_seed(7, 3), derive_slot_seed(8, 3));
    }

    #[test]
    fn built_entries_point_at_good_maps() {
        let manifest = small_manifest();
        assert_eq!(manifest.entries.len(), 4);
        for entry in &manifest.entries {
            assert_eq!(entry.seed, entry.requested_seed.wrapping_add(entry.rerolls));
            let map = manifest.map_for(entry.slot).expect("valid config").expect("slot exists");
            assert!(!map.is_bad(), "slot {} stored a bad seed", entry.slot);
            assert_eq!((map.width, map.height), (entry.width, entry.height));
        }
    }

    #[test]
    fn test_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("saves").join("manifest.json");
        let manifest = small_manifest();

        manifest.write_atomic(&path).expect("write");
        assert!(path.exists());

        let loaded = SeedManifest::load(&path).expect("load");
        assert_eq!(manifest, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn tampered_seed_fails_verification() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("manifest.json");
        let mut manifest = small_manifest();
        manifest.entries[2].seed = manifest.entries[2].seed.wrapping_add(1);
        manifest.write_atomic(&path).expect("write");

        let err = SeedManifest::load(&path).expect_err("tampered manifest must not load");
        assert!(matches!(err, ManifestError::FingerprintMismatch { slot: 2, .. }), "{err}");
    }

    #[test]
    fn forced_map_type_is_recorded_and_replayed() {
        let manifest = SeedManifest::build(
            &MapGenConfig::default(),
            99,
            3,
            Some(MapType::ALL_EXITS),
            32,
        )
        .expect("manifest builds");

        assert_eq!(manifest.map_type, Some(15));
        assert!(manifest.entries.iter().all(|entry| entry.map_type == 15));
        assert!(manifest.verify().is_ok());
    }

    #[test]
    fn garbage_file_reports_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("manifest.json");
        fs::write(&path, "{ not json").expect("write");

        assert!(matches!(SeedManifest::load(&path), Err(ManifestError::Parse(_))));
    }

    #[test]
    fn unreachable_area_limit_is_rejected_before_any_slot_is_built() {
        let config = MapGenConfig { area_limit: 0, ..Default::default() };
        let err = SeedManifest::build(&config, 2024, 4, None, 32).expect_err("config is invalid");
        assert!(
            matches!(
                err,
                ManifestError::InvalidConfig(ConfigError::AreaLimitUnreachable { limit: 0, .. })
            ),
            "{err}"
        );
    }

    #[test]
    fn unknown_format_version_is_rejected() {
        let mut manifest = small_manifest();
        manifest.format_version = 99;
        assert!(matches!(manifest.verify(), Err(ManifestError::UnsupportedVersion(99))));
    }
}
