#![allow(dead_code)]

use std::{io, sync::Mutex};

use splitter_integration::CommandExecutor;

pub const PACKAGE: &str = "01ca59a8d6ea4f7efa1765cef702d14e47570c079aedd44992dd09";
pub const COMPONENT: &str = "02e0905317d684478c275540e2ed7170f217e0c557805f7fd2a0d3";
pub const ADMIN_BADGE: &str = "03eb23d0867f32265935d93970aded9033cc868d31795f27d8cb62";
pub const INTERNAL_ADMIN_BADGE: &str = "03d1f50010e4102d88aacc347711491f852c515134a9ecf67ba17c";
pub const SHAREHOLDERS_BADGE: &str = "03d527faee6d0b91e7c1bab500c6a986e5777a25d704acc288d542";

pub fn account_address(index: usize) -> String {
    format!("02{:052x}", 0xacc0 + index)
}

pub fn public_key(index: usize) -> String {
    format!("04{:064x}", 0xbee0 + index)
}

pub fn new_account_response(index: usize) -> String {
    format!(
        "A new account has been created!\n\
         Account address: {}\n\
         Public key: {}\n\
         No configuration found on system. will use the above account as default.",
        account_address(index),
        public_key(index)
    )
}

pub fn instantiation_response() -> String {
    format!(
        "Transaction Status: SUCCESS\n\
         Execution Time: 27 ms\n\
         Instructions:\n\
         ├─ CallFunction {{ package_address: {PACKAGE}, blueprint_name: \"PaymentSplitter\", function: \"new\", args: [] }}\n\
         └─ End {{ signers: [] }}\n\
         Results:\n\
         ├─ Ok(Some(()))\n\
         └─ Ok(None)\n\
         Logs: 0\n\
         New Entities: 4\n\
         └─ Component: {COMPONENT}\n\
         ├─ ResourceDef: {ADMIN_BADGE}\n\
         ├─ ResourceDef: {INTERNAL_ADMIN_BADGE}\n\
         └─ ResourceDef: {SHAREHOLDERS_BADGE}"
    )
}

/// Answers like `resim` would and records every command line it receives.
#[derive(Debug, Default)]
pub struct FakeSimulator {
    calls: Mutex<Vec<String>>,
    accounts_created: Mutex<usize>,
    /// Replaces every response with this text, as a broken install would.
    broken: Option<String>,
    omit_public_key: bool,
}

impl FakeSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken(output: &str) -> Self {
        Self {
            broken: Some(output.to_string()),
            ..Self::default()
        }
    }

    pub fn without_public_key() -> Self {
        Self {
            omit_public_key: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, args: &[String]) -> String {
        if let Some(output) = &self.broken {
            return output.clone();
        }

        match args.get(1).map(String::as_str) {
            Some("reset") => "Data directory cleared".to_string(),
            Some("new-account") => {
                let mut created = self.accounts_created.lock().unwrap();
                let response = new_account_response(*created);
                *created += 1;
                if self.omit_public_key {
                    response
                        .lines()
                        .filter(|line| !line.starts_with("Public key"))
                        .collect::<Vec<_>>()
                        .join("\n")
                } else {
                    response
                }
            }
            Some("set-default-account") => "Default account updated!".to_string(),
            Some("publish") => format!("Success! New Package: {PACKAGE}"),
            Some("call-function") => instantiation_response(),
            _ => format!("error: unrecognized subcommand '{}'", args.join(" ")),
        }
    }
}

impl CommandExecutor for FakeSimulator {
    async fn run(&self, args: &[String]) -> io::Result<String> {
        self.calls.lock().unwrap().push(args.join(" "));
        Ok(self.respond(args))
    }
}

/// Fails every command as if the shell itself could not be started.
#[derive(Debug, Default)]
pub struct UnspawnableShell;

impl CommandExecutor for UnspawnableShell {
    async fn run(&self, _args: &[String]) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::NotFound, "sh: not found"))
    }
}
