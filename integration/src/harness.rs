//! End-to-end setup: simulator state first, manifests last.

use std::path::PathBuf;

use rand::Rng;
use tracing::info;

use crate::{
    config::HarnessConfig,
    error::HarnessResult,
    executor::CommandExecutor,
    manifest::{write_manifests, ManifestContext},
    resim::{Account, Simulator, SplitterInstance},
};

/// What a harness run created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessReport {
    pub accounts: Vec<Account>,
    pub package: String,
    pub instance: SplitterInstance,
    /// Share amount assigned to each account, in account order.
    pub shares: Vec<u32>,
    pub manifests: Vec<PathBuf>,
}

/// Resets the simulator, deploys a fresh splitter and writes its manifests.
///
/// Calls are issued one at a time and the first failure aborts the run.
/// Nothing already created in the simulator is rolled back.
pub async fn run_harness<E, R>(
    simulator: &Simulator<E>,
    config: &HarnessConfig,
    rng: &mut R,
) -> HarnessResult<HarnessReport>
where
    E: CommandExecutor,
    R: Rng,
{
    config.validate()?;

    simulator.reset().await?;
    info!(simulator = simulator.program(), "simulator reset");

    let mut accounts = Vec::with_capacity(config.account_count);
    for _ in 0..config.account_count {
        let account = simulator.new_account().await?;
        info!(%account, "created account");
        accounts.push(account);
    }
    simulator.set_default_account(&accounts[0]).await?;

    let package = simulator.publish(&config.package_dir).await?;
    info!(%package, "published package");

    let response = simulator
        .call_function(&package, &config.blueprint, &config.constructor, &[])
        .await?;
    let instance = SplitterInstance::from_response(&response)?;
    info!(
        component = %instance.component,
        admin_badge = %instance.admin_badge,
        internal_admin_badge = %instance.internal_admin_badge,
        shareholders_badge = %instance.shareholders_badge,
        "instantiated component"
    );

    let shares: Vec<u32> = accounts
        .iter()
        .map(|_| config.share_range.sample(rng))
        .collect();

    let manifests = ManifestContext {
        package: &package,
        blueprint: &config.blueprint,
        constructor: &config.constructor,
        instance: &instance,
        accounts: &accounts,
        shares: &shares,
        radix_token: &config.radix_token,
        funding_amount: config.funding_amount,
    }
    .render()?;
    let manifests = write_manifests(&config.manifest_dir(), &manifests).await?;

    Ok(HarnessReport {
        accounts,
        package,
        instance,
        shares,
        manifests,
    })
}
