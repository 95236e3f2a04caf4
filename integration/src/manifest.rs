//! Transaction manifest templates.
//!
//! Templates are written as indented, commented blocks and pass through
//! [`clean_manifest_content`] before they reach disk.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    error::{HarnessError, HarnessResult},
    resim::{Account, SplitterInstance},
};

pub const MANIFEST_EXTENSION: &str = "rtm";

const COMMENT_MARKER: char = '#';

/// Strips indentation and `#` comment lines from a raw template.
pub fn clean_manifest_content(raw: &str) -> String {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: &'static str,
    pub content: String,
}

impl Manifest {
    fn from_template(name: &'static str, raw: &str) -> Self {
        Self {
            name,
            content: clean_manifest_content(raw),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, MANIFEST_EXTENSION)
    }
}

/// Identifiers interpolated into the manifests.
#[derive(Debug, Clone, Copy)]
pub struct ManifestContext<'a> {
    pub package: &'a str,
    pub blueprint: &'a str,
    pub constructor: &'a str,
    pub instance: &'a SplitterInstance,
    /// The first account holds the admin badge; the second withdraws.
    pub accounts: &'a [Account],
    /// One share amount per account.
    pub shares: &'a [u32],
    pub radix_token: &'a str,
    pub funding_amount: u64,
}

impl ManifestContext<'_> {
    /// Renders every manifest, in the order they are meant to be run.
    pub fn render(&self) -> HarnessResult<Vec<Manifest>> {
        if self.accounts.len() < 2 {
            return Err(HarnessError::InvalidConfig(format!(
                "manifests need at least 2 accounts, got {}",
                self.accounts.len()
            )));
        }
        if self.shares.len() != self.accounts.len() {
            return Err(HarnessError::InvalidConfig(format!(
                "{} share amounts given for {} accounts",
                self.shares.len(),
                self.accounts.len()
            )));
        }

        Ok(vec![
            Manifest::from_template("component_creation", &self.component_creation()),
            Manifest::from_template("adding_shareholders", &self.adding_shareholders()),
            Manifest::from_template("funding_the_splitter", &self.funding_the_splitter()),
            Manifest::from_template("withdrawing_owed_amount", &self.withdrawing_owed_amount()),
        ])
    }

    fn component_creation(&self) -> String {
        let package = self.package;
        let blueprint = self.blueprint;
        let constructor = self.constructor;
        let admin = self.accounts[0].address();

        format!(
            r#"
            # Instantiates a splitter from the published package. The badges minted by the
            # constructor end up on the worktop and go to the admin account.
            CALL_FUNCTION Address("{package}") "{blueprint}" "{constructor}";
            CALL_METHOD_WITH_ALL_RESOURCES Address("{admin}") "deposit_batch";
            "#
        )
    }

    fn adding_shareholders(&self) -> String {
        let component = &self.instance.component;
        let admin_badge = &self.instance.admin_badge;
        let shareholders_badge = &self.instance.shareholders_badge;
        let admin = self.accounts[0].address();

        // Each method call consumes one badge ref, so every shareholder gets its own clone.
        let clones: String = (1..self.accounts.len())
            .map(|i| {
                format!(
                    "CLONE_BUCKET_REF BucketRef(\"admin_badge_bucket_ref0\") BucketRef(\"admin_badge_bucket_ref{i}\");\n"
                )
            })
            .collect();

        let additions: String = self
            .accounts
            .iter()
            .zip(self.shares)
            .enumerate()
            .map(|(i, (account, share))| {
                format!(
                    "CALL_METHOD Address(\"{component}\") \"add_shareholder\" Address(\"{address}\") Decimal(\"{amount}\") BucketRef(\"admin_badge_bucket_ref{i}\");\n",
                    address = account.address(),
                    amount = decimal(*share),
                )
            })
            .collect();

        let deliveries: String = self
            .accounts
            .iter()
            .enumerate()
            .map(|(i, account)| {
                format!(
                    "TAKE_NON_FUNGIBLES_FROM_WORKTOP TreeSet<NonFungibleKey>(NonFungibleKey(\"{i:032x}\")) Address(\"{shareholders_badge}\") Bucket(\"badge_{i}\");\n\
                     CALL_METHOD Address(\"{address}\") \"deposit\" Bucket(\"badge_{i}\");\n\n",
                    address = account.address(),
                )
            })
            .collect();

        format!(
            r#"
            # Enrolls every account as a shareholder. Only the admin may do this, so the admin
            # badge is pulled out of the admin account first and presented by reference.
            CALL_METHOD Address("{admin}") "withdraw" Decimal("1.0") Address("{admin_badge}") BucketRef(1u32);
            TAKE_FROM_WORKTOP Decimal("1.0") Address("{admin_badge}") Bucket("admin_badge_bucket");
            CREATE_BUCKET_REF Bucket("admin_badge_bucket") BucketRef("admin_badge_bucket_ref0");
            {clones}
            # One call per shareholder, each with its own share amount.
            {additions}
            # The admin badge is no longer needed.
            CALL_METHOD Address("{admin}") "deposit" Bucket("admin_badge_bucket");

            # What is left on the worktop are the shareholder NFTs, keyed by enrollment order.
            {deliveries}
            "#
        )
    }

    fn funding_the_splitter(&self) -> String {
        let component = &self.instance.component;
        let admin = self.accounts[0].address();
        let radix_token = self.radix_token;
        let amount = decimal(self.funding_amount);

        format!(
            r#"
            # Gives the splitter some XRD to distribute.
            CALL_METHOD Address("{admin}") "withdraw" Decimal("{amount}") Address("{radix_token}") BucketRef(1u32);
            TAKE_FROM_WORKTOP Decimal("{amount}") Address("{radix_token}") Bucket("xrd_bucket");
            CALL_METHOD Address("{component}") "deposit_xrd" Bucket("xrd_bucket");
            "#
        )
    }

    fn withdrawing_owed_amount(&self) -> String {
        let component = &self.instance.component;
        let shareholders_badge = &self.instance.shareholders_badge;
        let shareholder = self.accounts[1].address();

        format!(
            r#"
            # A shareholder claims what it is owed by presenting its shareholder NFT.
            CALL_METHOD Address("{shareholder}") "withdraw" Decimal("1.0") Address("{shareholders_badge}") BucketRef(1u32);
            TAKE_FROM_WORKTOP Decimal("1.0") Address("{shareholders_badge}") Bucket("shareholder_badge_bucket");
            CREATE_BUCKET_REF Bucket("shareholder_badge_bucket") BucketRef("shareholder_badge_bucket_ref");
            CALL_METHOD Address("{component}") "withdraw_xrd" BucketRef("shareholder_badge_bucket_ref");

            # Both the badge and the withdrawn XRD go back to the shareholder.
            CALL_METHOD_WITH_ALL_RESOURCES Address("{shareholder}") "deposit_batch";
            "#
        )
    }
}

/// Whole amounts printed with the two decimals the manifest parser expects.
fn decimal(value: impl Into<u64>) -> String {
    format!("{}.00", value.into())
}

/// Writes each manifest as `<name>.rtm` under `dir`, replacing existing files.
pub async fn write_manifests(dir: &Path, manifests: &[Manifest]) -> HarnessResult<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| HarnessError::WriteManifest {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        let path = dir.join(manifest.file_name());
        tokio::fs::write(&path, &manifest.content)
            .await
            .map_err(|source| HarnessError::WriteManifest {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "wrote manifest");
        written.push(path);
    }

    Ok(written)
}
