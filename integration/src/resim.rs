//! Thin wrapper over the `resim` command line.
//!
//! Every call goes through a [`CommandExecutor`] and the textual response is
//! scraped for `<Label>: <token>` entries. The simulator offers no structured
//! output, so these patterns are the whole contract.

use std::{fmt, path::Path, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::{
    error::{ExtractionError, HarnessError, HarnessResult},
    executor::CommandExecutor,
};

/// Binary name used when nothing else is configured.
pub const DEFAULT_SIMULATOR: &str = "resim";

/// Identifier labels printed by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    PublicKey,
    AccountAddress,
    Package,
    ResourceDef,
    Component,
}

impl Label {
    /// Text printed in front of the identifier.
    pub fn marker(self) -> &'static str {
        match self {
            Label::PublicKey => "Public key",
            Label::AccountAddress => "Account address",
            Label::Package => "Package",
            Label::ResourceDef => "ResourceDef",
            Label::Component => "Component",
        }
    }

    fn pattern(self) -> &'static Regex {
        static PUBLIC_KEY: LazyLock<Regex> = LazyLock::new(|| label_regex(Label::PublicKey));
        static ACCOUNT_ADDRESS: LazyLock<Regex> =
            LazyLock::new(|| label_regex(Label::AccountAddress));
        static PACKAGE: LazyLock<Regex> = LazyLock::new(|| label_regex(Label::Package));
        static RESOURCE_DEF: LazyLock<Regex> = LazyLock::new(|| label_regex(Label::ResourceDef));
        static COMPONENT: LazyLock<Regex> = LazyLock::new(|| label_regex(Label::Component));

        match self {
            Label::PublicKey => &*PUBLIC_KEY,
            Label::AccountAddress => &*ACCOUNT_ADDRESS,
            Label::Package => &*PACKAGE,
            Label::ResourceDef => &*RESOURCE_DEF,
            Label::Component => &*COMPONENT,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

fn label_regex(label: Label) -> Regex {
    Regex::new(&format!(r"{}: (\w+)", regex::escape(label.marker())))
        .expect("label patterns are valid regexes")
}

/// Every token following `label` in `output`, in order of appearance.
pub fn extract_all(label: Label, output: &str) -> Vec<String> {
    label
        .pattern()
        .captures_iter(output)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// The first token following `label` in `output`.
pub fn extract_first(label: Label, output: &str) -> Result<String, ExtractionError> {
    label
        .pattern()
        .captures(output)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| ExtractionError::PatternNotFound {
            label,
            output: output.to_string(),
        })
}

/// A simulator account. Lives for as long as the simulator state does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    address: String,
    public_key: String,
}

impl Account {
    pub fn new(address: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            public_key: public_key.into(),
        }
    }

    /// Builds an account from the output of `resim new-account`.
    pub fn from_response(output: &str) -> Result<Self, ExtractionError> {
        let public_key = extract_first(Label::PublicKey, output)?;
        let address = extract_first(Label::AccountAddress, output)?;
        Ok(Self::new(address, public_key))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account(address = {}, public_key = {})",
            self.address, self.public_key
        )
    }
}

/// Addresses created by instantiating a PaymentSplitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterInstance {
    pub component: String,
    pub admin_badge: String,
    pub internal_admin_badge: String,
    pub shareholders_badge: String,
}

impl SplitterInstance {
    /// Parses the output of the constructor call.
    ///
    /// The three badge definitions are reported in creation order: admin,
    /// internal admin, shareholders.
    pub fn from_response(output: &str) -> Result<Self, ExtractionError> {
        let resources = extract_all(Label::ResourceDef, output);
        let [admin_badge, internal_admin_badge, shareholders_badge]: [String; 3] = resources
            .try_into()
            .map_err(|found: Vec<String>| ExtractionError::UnexpectedMatchCount {
                label: Label::ResourceDef,
                expected: 3,
                found: found.len(),
            })?;
        let component = extract_first(Label::Component, output)?;

        Ok(Self {
            component,
            admin_badge,
            internal_admin_badge,
            shareholders_badge,
        })
    }
}

/// The simulator commands the harness relies on.
#[derive(Debug, Clone)]
pub struct Simulator<E> {
    executor: E,
    program: String,
}

impl<E: CommandExecutor> Simulator<E> {
    pub fn new(executor: E) -> Self {
        Self::with_program(executor, DEFAULT_SIMULATOR)
    }

    pub fn with_program(executor: E, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn invoke(&self, args: &[&str]) -> HarnessResult<String> {
        let command: Vec<String> = std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();

        self.executor
            .run(&command)
            .await
            .map_err(|source| HarnessError::Command {
                command: command.join(" "),
                source,
            })
    }

    /// Wipes all simulator state.
    pub async fn reset(&self) -> HarnessResult<()> {
        self.invoke(&["reset"]).await?;
        Ok(())
    }

    pub async fn new_account(&self) -> HarnessResult<Account> {
        let output = self.invoke(&["new-account"]).await?;
        let account = Account::from_response(&output)?;
        debug!(address = account.address(), "new account");
        Ok(account)
    }

    pub async fn set_default_account(&self, account: &Account) -> HarnessResult<()> {
        self.invoke(&[
            "set-default-account",
            account.address(),
            account.public_key(),
        ])
        .await?;
        Ok(())
    }

    /// Publishes the package found in `dir`, returning its address.
    pub async fn publish(&self, dir: &Path) -> HarnessResult<String> {
        let dir = dir.display().to_string();
        let output = self.invoke(&["publish", &dir]).await?;
        Ok(extract_first(Label::Package, &output)?)
    }

    /// Calls a blueprint function and returns the raw response.
    pub async fn call_function(
        &self,
        package: &str,
        blueprint: &str,
        function: &str,
        args: &[&str],
    ) -> HarnessResult<String> {
        let mut command = vec!["call-function", package, blueprint, function];
        command.extend_from_slice(args);
        self.invoke(&command).await
    }
}
