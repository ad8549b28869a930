use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn set_then_get_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("kvcli")?;

    cmd.args(["-n", "--query=c1 begin"]);
    cmd.assert().success().stdout(predicate::str::contains("OK, tx 1"));

    Ok(())
}

#[test]
fn unknown_verb_is_a_client_error_not_a_panic() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("kvcli")?;

    cmd.args(["-n", "--query=c1 frobnicate"]);
    cmd.assert().success().stderr(predicate::str::contains("unknown verb"));

    Ok(())
}

#[test]
fn multiline_session_via_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("kvcli")?;
    cmd.arg("-n");
    cmd.write_stdin("c1 begin\nc1 set x hey\nc1 get x\nc1 commit\n");
    cmd.assert().success().stdout(predicate::str::contains("hey"));

    Ok(())
}

#[test]
fn status_reports_transaction_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("kvcli")?;
    cmd.arg("-n");
    cmd.write_stdin("c1 status\nc1 begin\nc1 status\nc1 commit\nc1 status\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("no active transaction"))
        .stdout(predicate::str::contains("in progress"));

    Ok(())
}

#[test]
fn honors_default_isolation_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let config = assert_fs::NamedTempFile::new("kvdb.toml")?;
    config.write_str(
        "default_isolation = \"ReadUncommitted\"\nprompt = \"testdb\"\ndebug = false\nlog_level = \"info\"\n",
    )?;

    let mut cmd = Command::cargo_bin("kvcli")?;
    cmd.arg("-n").arg("-c").arg(config.path());
    cmd.write_stdin("c1 begin\nc1 set x hey\nc2 begin\nc2 get x\n");
    cmd.assert().success().stdout(predicate::str::contains("hey"));

    Ok(())
}
