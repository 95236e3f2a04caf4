//! Harness settings.
//!
//! Everything the harness used to hard-code lives here, with the historical
//! values as defaults. Settings can be loaded from a TOML file and then
//! overridden from the command line.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{HarnessError, HarnessResult},
    resim::DEFAULT_SIMULATOR,
};

/// Directory, relative to the package, that receives the manifests.
pub const MANIFEST_SUBDIR: &str = "transactions";

/// Address of the XRD resource on a freshly reset simulator.
pub const RADIX_TOKEN: &str = "030000000000000000000000000000000000000000000000000004";

fn default_package_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Simulator binary to invoke.
    pub simulator: String,
    /// Directory holding the blueprint package to publish.
    pub package_dir: PathBuf,
    /// Where manifests are written. Defaults to `<package_dir>/transactions`.
    pub manifest_dir: Option<PathBuf>,
    pub account_count: usize,
    pub share_range: ShareRange,
    pub blueprint: String,
    pub constructor: String,
    pub radix_token: String,
    /// Whole XRD deposited into the splitter by the funding manifest.
    pub funding_amount: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            simulator: DEFAULT_SIMULATOR.to_string(),
            package_dir: default_package_dir(),
            manifest_dir: None,
            account_count: 4,
            share_range: ShareRange::default(),
            blueprint: "PaymentSplitter".to_string(),
            constructor: "new".to_string(),
            radix_token: RADIX_TOKEN.to_string(),
            funding_amount: 90_000,
        }
    }
}

impl HarnessConfig {
    /// Load and validate settings from a TOML file. Missing keys keep their
    /// defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| HarnessError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| HarnessError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded harness config");
        Ok(config)
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.manifest_dir
            .clone()
            .unwrap_or_else(|| self.package_dir.join(MANIFEST_SUBDIR))
    }

    pub fn validate(&self) -> HarnessResult<()> {
        // The withdrawal manifest is signed by the second account.
        if self.account_count < 2 {
            return Err(HarnessError::InvalidConfig(format!(
                "at least 2 accounts are required, got {}",
                self.account_count
            )));
        }
        if self.share_range.min > self.share_range.max {
            return Err(HarnessError::InvalidConfig(format!(
                "share range {}..={} is empty",
                self.share_range.min, self.share_range.max
            )));
        }
        Ok(())
    }
}

/// Inclusive bounds for the share amount drawn for each shareholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShareRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ShareRange {
    fn default() -> Self {
        Self { min: 50, max: 150 }
    }
}

impl ShareRange {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }
}
