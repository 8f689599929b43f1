// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn missing_program_is_an_exec_error() {
    let cli = DockerCli::new("/nonexistent/docker");
    let err = cli.start(&WorkerId::new("abc")).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Exec { .. }));
}

#[tokio::test]
async fn failing_command_reports_subcommand() {
    let cli = DockerCli::new("false");
    let err = cli.remove(&WorkerId::new("abc")).await.unwrap_err();
    match err {
        RuntimeError::Command { command, .. } => assert_eq!(command, "false rm"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn successful_command_returns_unit() {
    let cli = DockerCli::new("true");
    cli.start(&WorkerId::new("abc")).await.unwrap();
}

#[tokio::test]
async fn create_reads_id_from_last_line() {
    // `echo` prints its arguments, so the "id" is the rendered argument line.
    let cli = DockerCli::new("echo");
    let spec = ContainerSpec {
        image: "img".into(),
        hostname: "localhost".into(),
        env: Vec::new(),
        exposed_ports: Vec::new(),
        host: Default::default(),
    };
    let id = cli.create(&spec).await.unwrap();
    assert_eq!(id.as_str(), "create --hostname localhost img");
}

#[tokio::test]
async fn empty_create_output_is_an_error() {
    let cli = DockerCli::new("true");
    let spec = ContainerSpec {
        image: "img".into(),
        hostname: "localhost".into(),
        env: Vec::new(),
        exposed_ports: Vec::new(),
        host: Default::default(),
    };
    assert!(matches!(cli.create(&spec).await, Err(RuntimeError::Output(_))));
}
