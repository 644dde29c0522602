use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;

const CONFIG: &str = r#"
repo = "acme/app"

[build]
oses = ["linux", "darwin"]
arches = ["amd64"]

[changelog]
version_command = []
"#;

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".release.toml"), CONFIG).unwrap();
    std::fs::write(dir.path().join("CHANGES.txt"), "- fix bug").unwrap();
    std::fs::create_dir(dir.path().join("dist")).unwrap();
    dir
}

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kodegen_release_publish").unwrap();
    cmd.current_dir(dir)
        .env_remove("GH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_changelog_prints_body() {
    let dir = workspace();
    cli(dir.path())
        .args(["changelog", "--tag", "v1.2.0", "--diff-file", "CHANGES.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Changelog\n- fix bug\n\n--\nAutomated with @goreleaser"))
        .stdout(predicate::str::contains("Built with").not());
}

#[test]
fn test_check_passes_when_all_archives_exist() {
    let dir = workspace();
    std::fs::write(dir.path().join("dist/app_linux_amd64.tar.gz"), b"x").unwrap();
    std::fs::write(dir.path().join("dist/app_darwin_amd64.tar.gz"), b"x").unwrap();

    cli(dir.path())
        .args(["check", "--tag", "v1.2.0", "--diff-file", "CHANGES.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app_linux_amd64.tar.gz"))
        .stdout(predicate::str::contains("All 2 archive(s) ready"));
}

#[test]
fn test_check_fails_on_missing_archive() {
    let dir = workspace();
    std::fs::write(dir.path().join("dist/app_linux_amd64.tar.gz"), b"x").unwrap();

    cli(dir.path())
        .args(["check", "--tag", "v1.2.0", "--diff-file", "CHANGES.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("app_darwin_amd64.tar.gz (missing)"));
}

#[test]
fn test_release_without_token_fails() {
    let dir = workspace();
    cli(dir.path())
        .args(["release", "--tag", "v1.2.0", "--diff-file", "CHANGES.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GitHub token not provided"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["check", "--tag", "v1.2.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config file"));
}

const RELEASE_JSON: &str = r#"{"id":7,"name":"v1.2.0","tag_name":"v1.2.0","body":"","html_url":"https://github.com/acme/app/releases/tag/v1.2.0"}"#;

/// Answer one request per connection with the canned responses, in order
fn serve(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    std::thread::spawn(move || {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut data = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                data.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&data).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|line| {
                            let (key, value) = line.split_once(':')?;
                            key.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if data.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
    });

    base
}

#[test]
fn test_release_reports_every_target_when_an_upload_fails() {
    let base = serve(vec![
        (404, r#"{"message":"Not Found"}"#),
        (201, RELEASE_JSON),
        (201, r#"{"id":1,"name":"app_linux_amd64.tar.gz"}"#),
    ]);

    let dir = workspace();
    let config = format!(
        "{}\n[github]\napi_url = \"{}\"\nupload_url = \"{}\"\n",
        CONFIG, base, base
    );
    std::fs::write(dir.path().join(".release.toml"), config).unwrap();
    std::fs::write(dir.path().join("dist/app_linux_amd64.tar.gz"), b"x").unwrap();

    cli(dir.path())
        .env("GITHUB_TOKEN", "secret-token")
        .args(["release", "--tag", "v1.2.0", "--diff-file", "CHANGES.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Created release v1.2.0"))
        .stdout(predicate::str::contains("linux/amd64"))
        .stdout(predicate::str::contains("app_linux_amd64.tar.gz"))
        .stdout(predicate::str::contains("1 of 2 upload(s) failed, 1 uploaded"))
        .stderr(predicate::str::contains("darwin/amd64"))
        .stderr(predicate::str::contains("Cannot open artifact"));
}

#[test]
fn test_missing_diff_file_names_the_path() {
    let dir = workspace();
    cli(dir.path())
        .args(["changelog", "--tag", "v1.2.0", "--diff-file", "NOPE.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read changelog file NOPE.txt"));
}
