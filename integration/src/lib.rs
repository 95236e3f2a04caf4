//! Test harness for the PaymentSplitter blueprint.
//!
//! Drives the `resim` simulator to provision accounts, publish and instantiate
//! the package, and then emits the `.rtm` transaction manifests that walk the
//! component through shareholder enrollment, funding and withdrawal.

pub mod config;
pub mod error;
pub mod executor;
pub mod harness;
pub mod manifest;
pub mod resim;

pub use config::{HarnessConfig, ShareRange};
pub use error::{ExtractionError, HarnessError, HarnessResult};
pub use executor::{CommandExecutor, ShellExecutor};
pub use harness::{run_harness, HarnessReport};
pub use manifest::{clean_manifest_content, write_manifests, Manifest, ManifestContext};
pub use resim::{Account, Label, Simulator, SplitterInstance};
