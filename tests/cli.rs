use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INBOUND_PACKAGE: &str = r#"{
  "name": "inbound",
  "volta": { "node": "18.12.0" },
  "dependencies": {
    "mocha": "^10.0.0"
  },
  "devDependencies": {
    "@types/mocha": "^10.0.0"
  }
}
"#;

const PLAIN_PACKAGE: &str = r#"{
  "name": "plain",
  "dependencies": {
    "express": "^4.18.0"
  }
}
"#;

fn write(root: &Path, file: &str, content: &str) {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Builds `repo1` inside a fresh temp dir, which is also the working directory
/// of every command.
fn repo1() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for file in [
        "repo1/package.json",
        "repo1/outbound/New Zealand/package.json",
        "repo1/outbound/china/package.json",
        "repo1/outbound/china/mainland/package.json",
        "repo1/outbound/china/mainland/node_modules/package1/package.json",
        "repo1/outbound/china/mainland/node_modules/package1/node_modules/package1-1/package.json",
        "repo1/outbound/china/mainland/node_modules/package2/package.json",
    ] {
        write(root, file, PLAIN_PACKAGE);
    }
    write(root, "repo1/inbound/package.json", INBOUND_PACKAGE);
    for file in [
        "repo1/inbound/serverless.yml",
        "repo1/outbound/New Zealand/serverless.yml",
        "repo1/outbound/australia/serverless.yml",
        "repo1/outbound/australia/build.gradle",
        "repo1/outbound/china/sars/serverless.ts",
        "repo1/outbound/china/sars/build.gradle",
        "repo1/outbound/usa/build.gradle.kts",
        "repo1/storage/mvn.xml",
        "repo1/api/package.yml",
    ] {
        write(root, file, "");
    }
    tmp
}

fn cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("ls-having");
    c.current_dir(dir.path()).env_remove("RUST_LOG");
    c
}

fn lines(paths: &[&str]) -> String {
    paths.iter().map(|p| format!("{}\n", p)).collect()
}

fn assert_lists(args: &[&str], expected: &[&str]) {
    let dir = repo1();
    cmd(&dir)
        .args(args)
        .assert()
        .success()
        .stderr("")
        .stdout(lines(expected));
}

mod usage {
    use super::*;

    #[test]
    fn no_argument_prints_usage_and_fails() {
        let dir = repo1();
        cmd(&dir)
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("Usage: ls-having"))
            .stdout(predicate::str::contains("References:"))
            .stderr("Error: flag file or check file must be specified\n");
    }

    #[test]
    fn help_succeeds() {
        let dir = repo1();
        cmd(&dir)
            .arg("-h")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("--flag-file"))
            .stdout(predicate::str::contains("References:"))
            .stderr("");
    }

    #[test]
    fn invalid_regexp_fails() {
        let dir = repo1();
        cmd(&dir)
            .args(["-f", "package.json", "-e", "(unclosed", "repo1"])
            .assert()
            .failure()
            .code(1)
            .stdout("")
            .stderr(predicate::str::starts_with("Error: Invalid regular expression"));
    }
}

mod flag_files {
    use super::*;

    #[test]
    fn package_json_with_default_excludes() {
        assert_lists(
            &["-f", "package.json", "repo1"],
            &[
                "repo1",
                "repo1/inbound",
                "repo1/outbound/New Zealand",
                "repo1/outbound/china",
                "repo1/outbound/china/mainland",
            ],
        );
    }

    #[test]
    fn without_default_excludes_stops_at_depth_limit() {
        assert_lists(
            &["-f", "package.json", "--no-default-excludes", "repo1"],
            &[
                "repo1",
                "repo1/inbound",
                "repo1/outbound/New Zealand",
                "repo1/outbound/china",
                "repo1/outbound/china/mainland",
                "repo1/outbound/china/mainland/node_modules/package1",
                "repo1/outbound/china/mainland/node_modules/package2",
            ],
        );
    }

    #[test]
    fn depth_zero() {
        assert_lists(&["-f", "package.json", "-d", "0", "repo1"], &["repo1"]);
        assert_lists(
            &["-f", "package.json", "--depth", "0", "repo1/inbound"],
            &["repo1/inbound"],
        );
    }

    #[test]
    fn subdirectories_only() {
        assert_lists(
            &[
                "-f",
                "package.json",
                "--depth",
                "0",
                "--subdirectories-only",
                "--no-default-excludes",
                "repo1/inbound",
            ],
            &[],
        );
        assert_lists(
            &[
                "-f",
                "package.json",
                "--subdirectories-only",
                "--no-default-excludes",
                "repo1/outbound/china/mainland",
            ],
            &[
                "repo1/outbound/china/mainland/node_modules/package1",
                "repo1/outbound/china/mainland/node_modules/package1/node_modules/package1-1",
                "repo1/outbound/china/mainland/node_modules/package2",
            ],
        );
    }

    #[test]
    fn unlimited_depth() {
        assert_lists(
            &["-f", "package.json", "-n", "-d", "-1", "-s", "repo1/outbound/china"],
            &[
                "repo1/outbound/china/mainland",
                "repo1/outbound/china/mainland/node_modules/package1",
                "repo1/outbound/china/mainland/node_modules/package1/node_modules/package1-1",
                "repo1/outbound/china/mainland/node_modules/package2",
            ],
        );
    }

    #[test]
    fn globs() {
        assert_lists(
            &["-f", "serverless.*", "repo1"],
            &[
                "repo1/inbound",
                "repo1/outbound/New Zealand",
                "repo1/outbound/australia",
                "repo1/outbound/china/sars",
            ],
        );
        assert_lists(&["-f", "serverless.ts", "repo1"], &["repo1/outbound/china/sars"]);
        assert_lists(
            &["-f", "build.gradle*", "repo1"],
            &[
                "repo1/outbound/australia",
                "repo1/outbound/china/sars",
                "repo1/outbound/usa",
            ],
        );
    }

    #[test]
    fn several_flag_files() {
        assert_lists(
            &["-f", "build.gradle", "-f", "mvn.*", "repo1"],
            &[
                "repo1/outbound/australia",
                "repo1/outbound/china/sars",
                "repo1/storage",
            ],
        );
    }

    #[test]
    fn user_excludes() {
        assert_lists(
            &[
                "-f",
                "build.gradle",
                "-f",
                "mvn.*",
                "-x",
                "**/australia",
                "-x",
                "**/storage",
                "repo1",
            ],
            &["repo1/outbound/china/sars"],
        );
    }

    #[test]
    fn print0() {
        let dir = repo1();
        cmd(&dir)
            .args(["-f", "build.gradle", "-0", "repo1"])
            .assert()
            .success()
            .stdout("repo1/outbound/australia\0repo1/outbound/china/sars\0");
    }
}

mod check_file {
    use super::*;

    #[test]
    fn check_file_must_exist() {
        assert_lists(
            &["-f", "serverless.*", "-c", "build.gradle", "repo1"],
            &["repo1/outbound/australia", "repo1/outbound/china/sars"],
        );
        assert_lists(
            &["-f", "package.*", "-c", "package.yml", "repo1"],
            &["repo1/api"],
        );
    }

    #[test]
    fn check_file_alone_acts_as_flag_file() {
        assert_lists(
            &["-c", "build.gradle", "repo1"],
            &["repo1/outbound/australia", "repo1/outbound/china/sars"],
        );
    }

    #[test]
    fn content_regexp() {
        assert_lists(
            &["-f", "package.*", "-c", "package.json", "-e", r#""@types/mocha":"#, "repo1"],
            &["repo1/inbound"],
        );
        assert_lists(
            &["-f", "package.*", "-c", "package.json", "-e", r#""volta":"#, "repo1"],
            &["repo1/inbound"],
        );
        assert_lists(
            &[
                "-f",
                "package.*",
                "-c",
                "package.json",
                "-e",
                r#""dependencies":\s*\{[^{}]*"volta":"#,
                "repo1",
            ],
            &[],
        );
        assert_lists(
            &[
                "-f",
                "package.*",
                "-c",
                "package.json",
                "-e",
                r#""dependencies":\s*\{[^{}]*"mocha":"#,
                "repo1",
            ],
            &["repo1/inbound"],
        );
    }

    #[test]
    fn inverse_regexp() {
        // api has no package.json at all, which counts as positive when inverted.
        assert_lists(
            &["-f", "package.*", "-c", "package.json", "-e", r#""@types/mocha":"#, "-i", "repo1"],
            &[
                "repo1",
                "repo1/api",
                "repo1/outbound/New Zealand",
                "repo1/outbound/china",
                "repo1/outbound/china/mainland",
            ],
        );
    }
}

mod errors {
    use super::*;

    #[test]
    fn ignored_by_default() {
        let dir = repo1();
        cmd(&dir)
            .args(["-f", "anything", "non-existing-dir"])
            .assert()
            .success()
            .stdout("")
            .stderr("");
        cmd(&dir)
            .args(["-f", "anything", "--error", "ignore", "non-existing-dir"])
            .assert()
            .success()
            .stdout("")
            .stderr("");
    }

    #[test]
    fn printed() {
        let dir = repo1();
        cmd(&dir)
            .args(["-f", "anything", "--error", "print", "non-existing-dir"])
            .assert()
            .success()
            .stdout("")
            .stderr("Error: non-existing-dir: no such file or directory\n");
    }

    #[test]
    fn panic_exits_with_failure() {
        let dir = repo1();
        cmd(&dir)
            .args(["-f", "anything", "-r", "panic", "non-existing-dir"])
            .assert()
            .failure()
            .code(1)
            .stdout("")
            .stderr("Error: non-existing-dir: no such file or directory\n");
    }
}

mod presets {
    use super::*;

    #[test]
    fn preset_from_home_config() {
        let dir = repo1();
        write(
            dir.path(),
            "home/.config/ls-having/presets.toml",
            "[jvm]\nflag_file = [\"build.gradle\", \"mvn.*\"]\nexclude = [\"**/storage\"]\n",
        );
        cmd(&dir)
            .env("HOME", dir.path().join("home"))
            .args(["--preset", "jvm", "repo1"])
            .assert()
            .success()
            .stderr("")
            .stdout(lines(&["repo1/outbound/australia", "repo1/outbound/china/sars"]));
    }

    #[test]
    fn unknown_preset_fails() {
        let dir = repo1();
        cmd(&dir)
            .env("HOME", dir.path().join("home"))
            .args(["--preset", "nope", "repo1"])
            .assert()
            .failure()
            .code(1)
            .stderr("Error: Unknown preset: nope\n");
    }
}
