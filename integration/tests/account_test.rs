mod common;

use common::{account_address, new_account_response, public_key, FakeSimulator, UnspawnableShell};
use splitter_integration::{
    resim::{extract_all, extract_first},
    Account, ExtractionError, HarnessError, Label, Simulator, SplitterInstance,
};

#[test]
fn account_is_parsed_from_new_account_output() -> anyhow::Result<()> {
    let account = Account::from_response(&new_account_response(0))?;

    assert_eq!(account.address(), account_address(0));
    assert_eq!(account.public_key(), public_key(0));
    assert_eq!(
        account.to_string(),
        format!(
            "Account(address = {}, public_key = {})",
            account_address(0),
            public_key(0)
        )
    );
    Ok(())
}

#[test]
fn account_without_public_key_is_rejected() {
    let output = "A new account has been created!\nAccount address: 02abc";

    let err = Account::from_response(output).unwrap_err();

    assert_eq!(
        err,
        ExtractionError::PatternNotFound {
            label: Label::PublicKey,
            output: output.to_string(),
        }
    );
}

#[test]
fn first_match_wins_and_all_matches_keep_order() -> anyhow::Result<()> {
    let output = "ResourceDef: 03aa\nnoise\nResourceDef: 03bb\nResourceDef: 03cc";

    assert_eq!(extract_first(Label::ResourceDef, output)?, "03aa");
    assert_eq!(
        extract_all(Label::ResourceDef, output),
        vec!["03aa", "03bb", "03cc"]
    );
    assert!(extract_all(Label::Component, output).is_empty());
    Ok(())
}

#[test]
fn splitter_instance_requires_three_badges() {
    let output = "Component: 02aa\nResourceDef: 03aa\nResourceDef: 03bb";

    let err = SplitterInstance::from_response(output).unwrap_err();

    assert_eq!(
        err,
        ExtractionError::UnexpectedMatchCount {
            label: Label::ResourceDef,
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn splitter_instance_maps_badges_in_creation_order() -> anyhow::Result<()> {
    let instance = SplitterInstance::from_response(&common::instantiation_response())?;

    assert_eq!(instance.component, common::COMPONENT);
    assert_eq!(instance.admin_badge, common::ADMIN_BADGE);
    assert_eq!(instance.internal_admin_badge, common::INTERNAL_ADMIN_BADGE);
    assert_eq!(instance.shareholders_badge, common::SHAREHOLDERS_BADGE);
    Ok(())
}

#[tokio::test]
async fn simulator_issues_expected_command_lines() -> anyhow::Result<()> {
    let simulator = Simulator::new(FakeSimulator::new());

    simulator.reset().await?;
    let account = simulator.new_account().await?;
    simulator.set_default_account(&account).await?;
    let package = simulator.publish(std::path::Path::new(".")).await?;
    simulator
        .call_function(&package, "PaymentSplitter", "new", &[])
        .await?;

    assert_eq!(package, common::PACKAGE);
    assert_eq!(
        simulator.executor().calls(),
        vec![
            "resim reset".to_string(),
            "resim new-account".to_string(),
            format!(
                "resim set-default-account {} {}",
                account_address(0),
                public_key(0)
            ),
            "resim publish .".to_string(),
            format!("resim call-function {} PaymentSplitter new", common::PACKAGE),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn missing_public_key_fails_account_creation() {
    let simulator = Simulator::new(FakeSimulator::without_public_key());

    let err = simulator.new_account().await.unwrap_err();

    assert!(matches!(
        err,
        HarnessError::Extraction(ExtractionError::PatternNotFound {
            label: Label::PublicKey,
            ..
        })
    ));
}

#[tokio::test]
async fn spawn_failure_names_the_command() {
    let simulator = Simulator::with_program(UnspawnableShell, "resim");

    let err = simulator.reset().await.unwrap_err();

    match err {
        HarnessError::Command { command, .. } => assert_eq!(command, "resim reset"),
        other => panic!("expected a command error, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn shell_executor_returns_the_longer_stream() -> anyhow::Result<()> {
    use splitter_integration::{CommandExecutor, ShellExecutor};

    let args: Vec<String> = ["echo", "out;", "echo", "much longer error text", ">&2"]
        .into_iter()
        .map(String::from)
        .collect();

    let output = ShellExecutor.run(&args).await?;

    assert_eq!(output, "much longer error text");
    Ok(())
}

#[test]
fn stdout_wins_a_tie() {
    use splitter_integration::executor::longest_output;

    assert_eq!(longest_output(b"  abc\n", b"xyz   "), "abc");
    assert_eq!(longest_output(b"", b" only stderr \n"), "only stderr");
}
