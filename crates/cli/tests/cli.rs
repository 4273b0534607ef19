use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn lexis() -> Command {
    let mut cmd = Command::cargo_bin("lexis").expect("binary");
    cmd.env("LEXIS_EMBEDDING_MODE", "stub")
        .env_remove("LEXIS_PROVIDER_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn rewrite_stdin_json_contract() {
    let text = "The hot coffee was too hot to drink.";
    let value = run_json(
        lexis()
            .args(["rewrite", "-", "--json", "--density", "0.15"])
            .write_stdin(text),
    );

    assert_eq!(value["originalText"], text);
    assert!(value["modifiedText"].is_string());
    let made = value["substitutionsMade"].as_u64().unwrap();
    assert!(made <= 2);
    assert_eq!(value["substitutions"].as_array().unwrap().len() as u64, made);
}

#[test]
fn rewrite_file_prints_text() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("essay.txt");
    fs::write(&input, "We drank coffee on a cold morning.\n").unwrap();

    lexis()
        .arg("rewrite")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("coffee"));
}

#[test]
fn rewrite_is_deterministic() {
    let text = "It was a big problem and a hard idea, but a good start.";
    let first = run_json(lexis().args(["rewrite", "--json", "-d", "1.0"]).write_stdin(text));
    let second = run_json(lexis().args(["rewrite", "--json", "-d", "1.0"]).write_stdin(text));
    assert_eq!(first, second);
}

#[test]
fn rewrite_missing_file_fails() {
    lexis()
        .args(["rewrite", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn explain_lists_every_candidate() {
    let value = run_json(lexis().args([
        "explain",
        "hot",
        "--sentence",
        "The hot coffee was too hot to drink.",
        "--json",
    ]));

    let results = value.as_array().expect("array");
    let candidates: Vec<&str> = results
        .iter()
        .map(|r| r["candidate"].as_str().unwrap())
        .collect();
    assert_eq!(candidates, vec!["scorching", "sweltering", "piping"]);
    for result in results {
        assert_eq!(
            result["passed"].as_bool().unwrap(),
            result["reason"] == "PASSED"
        );
        assert_eq!(result["original"], "hot");
    }
}

#[test]
fn explain_includes_custom_vocabulary() {
    let temp = tempdir().unwrap();
    let vocab = temp.path().join("vocab.json");
    fs::write(
        &vocab,
        r#"[{"word": "hot", "synonym": "torrid", "examples": ["A torrid summer."]}]"#,
    )
    .unwrap();

    let value = run_json(
        lexis()
            .args(["explain", "hot", "--json", "--vocab"])
            .arg(&vocab),
    );
    let last = value.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["candidate"], "torrid");
}

#[test]
fn invalid_vocabulary_entry_is_rejected() {
    let temp = tempdir().unwrap();
    let vocab = temp.path().join("vocab.json");
    fs::write(&vocab, r#"[{"word": "hot"}]"#).unwrap();

    lexis()
        .args(["rewrite", "--vocab"])
        .arg(&vocab)
        .write_stdin("a hot day")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid vocabulary"));
}

#[test]
fn explain_text_output() {
    lexis()
        .args(["explain", "hot", "-s", "I got myself in hot water."])
        .assert()
        .success()
        .stdout(predicate::str::contains("scorching"))
        .stdout(predicate::str::contains("reason"));
}

#[test]
fn vocab_lists_builtin_words() {
    let value = run_json(lexis().args(["vocab", "--json"]));
    let hot = value["hot"].as_array().expect("hot entry");
    assert!(hot.iter().any(|c| c["word"] == "scorching"));

    lexis()
        .args(["vocab", "--word", "HOT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scorching"));
}

#[test]
fn config_file_is_validated() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("lexis.toml");
    fs::write(&config, "embedding_min = 0.95\nembedding_max = 0.5\n").unwrap();

    lexis()
        .args(["rewrite", "--config"])
        .arg(&config)
        .write_stdin("a hot day")
        .assert()
        .failure()
        .stderr(predicate::str::contains("embedding_min"));

    fs::write(&config, "max_density = 0.5\n").unwrap();
    lexis()
        .args(["rewrite", "--config"])
        .arg(&config)
        .write_stdin("a hot day")
        .assert()
        .success();
}

#[test]
fn unknown_embedding_mode_fails() {
    lexis()
        .env("LEXIS_EMBEDDING_MODE", "quantum")
        .args(["rewrite"])
        .write_stdin("a hot day")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LEXIS_EMBEDDING_MODE"));
}

#[test]
fn unreachable_providers_degrade_gracefully() {
    let value = run_json(
        lexis()
            .args([
                "rewrite",
                "--json",
                "--embed-mode",
                "http",
                "--provider-url",
                "http://127.0.0.1:9",
                "--timeout-secs",
                "60",
            ])
            .write_stdin("a hot day"),
    );
    assert_eq!(value["substitutionsMade"], 0);
    assert_eq!(value["modifiedText"], "a hot day");
}

#[test]
fn verbose_logs_embedding_model() {
    lexis()
        .args(["rewrite", "--verbose"])
        .write_stdin("a hot day")
        .assert()
        .success()
        .stderr(predicate::str::contains("embedder=stub-hash"));
}
