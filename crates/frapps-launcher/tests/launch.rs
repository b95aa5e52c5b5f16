//! End-to-end tests for the launcher run sequence.

#![cfg(unix)]

use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use frapps_launcher::{ExitOutcome, LauncherConfig, run_binary};

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn config_for(install_dir: &Path, repository_url: &str) -> LauncherConfig {
    let install_dir = install_dir.as_os_str().to_owned();
    let repository_url = OsString::from(repository_url);
    LauncherConfig::from_lookup(move |key| match key {
        "FRAPPS_INSTALL_DIR" => Some(install_dir.clone()),
        "FRAPPS_REPOSITORY_URL" => Some(repository_url.clone()),
        _ => None,
    })
}

#[tokio::test]
async fn test_exit_code_is_forwarded() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("exit7");
    write_script(&script, "exit 7");

    let outcome = run_binary(&script, &[]).await.unwrap();

    assert_eq!(outcome, ExitOutcome::Exited(7));
    assert_eq!(outcome.exit_code(), 7);
}

#[tokio::test]
async fn test_arguments_are_forwarded_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("echo-args");
    let out = dir.path().join("args.txt");
    write_script(
        &script,
        &format!("printf '%s\\n' \"$@\" > '{}'", out.display()),
    );

    let args: Vec<OsString> = ["deploy", "--flag=a b", "", "ünïcode"]
        .into_iter()
        .map(OsString::from)
        .collect();
    let outcome = run_binary(&script, &args).await.unwrap();

    assert_eq!(outcome, ExitOutcome::Exited(0));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "deploy\n--flag=a b\n\nünïcode\n"
    );
}

#[tokio::test]
async fn test_signal_maps_to_failure() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("crash");
    write_script(&script, "kill -9 $$");

    let outcome = run_binary(&script, &[]).await.unwrap();

    assert_eq!(outcome, ExitOutcome::Signaled);
    assert_eq!(outcome.exit_code(), 1);
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
mod linux {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    fn archive_path() -> String {
        let version = frapps_install::VERSION;
        format!(
            "/releases/download/{version}/frapps_{version}_x86_64-unknown-linux-musl.tar.gz"
        )
    }

    fn archive_with_entry(name: &str, contents: &str) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, name, contents.as_bytes())
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn archive_with_script(body: &str) -> Vec<u8> {
        archive_with_entry("frapps", &format!("#!/bin/sh\n{body}\n"))
    }

    #[tokio::test]
    async fn test_current_install_skips_download() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("version"), frapps_install::VERSION).unwrap();
        write_script(&dir.path().join("frapps"), "exit 3");

        let config = config_for(dir.path(), &server.url());
        let code = frapps_launcher::run(&config, &[]).await.unwrap();

        assert_eq!(code, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_current_install_runs_without_reachable_repository() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("version"), frapps_install::VERSION).unwrap();
        write_script(&dir.path().join("frapps"), "exit 0");

        let config = config_for(dir.path(), "http://127.0.0.1:9");
        let code = frapps_launcher::run(&config, &[]).await.unwrap();

        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_archive_without_binary_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", archive_path().as_str())
            .with_status(200)
            .with_body(archive_with_entry("README.md", "docs only"))
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), &server.url());
        let err = frapps_launcher::run(&config, &[]).await.unwrap_err();

        assert!(format!("{err:#}").contains("release archive did not contain"));
        assert!(frapps_launcher::failure_hint(&err).is_some());
        assert!(!dir.path().join("version").exists());
    }

    #[tokio::test]
    async fn test_stale_install_downloads_then_runs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", archive_path().as_str())
            .with_status(200)
            .with_body(archive_with_script("exit \"$#\""))
            .create_async()
            .await;

        let root = tempfile::tempdir().unwrap();
        let install_dir = root.path().join("bin");
        fs::create_dir_all(&install_dir).unwrap();
        fs::write(install_dir.join("version"), "0.0.0-old").unwrap();

        let config = config_for(&install_dir, &server.url());
        let args = vec![OsString::from("one"), OsString::from("two")];
        let code = frapps_launcher::run(&config, &args).await.unwrap();

        mock.assert_async().await;
        assert_eq!(code, 2);
        assert_eq!(
            fs::read_to_string(install_dir.join("version")).unwrap(),
            frapps_install::VERSION
        );
    }

    #[tokio::test]
    async fn test_download_failure_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", archive_path().as_str())
            .with_status(404)
            .create_async()
            .await;

        let root = tempfile::tempdir().unwrap();
        let install_dir = root.path().join("bin");

        let config = config_for(&install_dir, &server.url());
        let err = frapps_launcher::run(&config, &[]).await.unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("Unable to download package: 404 Not Found."));
        assert!(!install_dir.join("version").exists());
    }
}
