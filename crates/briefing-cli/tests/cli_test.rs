//! End-to-end runs of the `inbox-briefing` binary against export files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::json;
use tempfile::{tempdir, TempDir};

fn write_exports(dir: &Path) {
    let emails = json!([
        {
            "subject": "見積もりのご確認",
            "sender": "田中",
            "sender_email": "tanaka@client.jp",
            "received_time": "2024-03-01 08:15:00",
            "body": "添付の見積もりをご確認ください。",
            "has_attachments": true,
            "attachments": [{"filename": "quote.pdf", "size": 2048}]
        },
        {"subject": "既読", "unread": false}
    ]);
    // Unparsable start passes the window and is dropped by the composer
    let events = json!([
        {"subject": "未定の打ち合わせ", "start": "tomorrow", "end": "tomorrow"}
    ]);
    fs::write(dir.join("emails.json"), emails.to_string()).unwrap();
    fs::write(dir.join("events.json"), events.to_string()).unwrap();
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inbox-briefing"))
        .args(args)
        .current_dir(dir.path())
        .env("BRIEFING_STATE_DIR", dir.path().join("state"))
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("ANTHROPIC_VERSION")
        .env_remove("ANTHROPIC_MODEL")
        .env_remove("ANTHROPIC_API_URL")
        .env_remove("BRIEFING_REPORT_DIR")
        .env_remove("BRIEFING_EMAILS_FILE")
        .env_remove("BRIEFING_EVENTS_FILE")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run inbox-briefing")
}

fn reports_in(dir: &Path) -> Vec<std::path::PathBuf> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with("assistant_report_"))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_prompt_only_prints_prompt() {
    let dir = tempdir().unwrap();
    write_exports(dir.path());

    let output = run(
        &dir,
        &[
            "--prompt-only",
            "--emails-file",
            "emails.json",
            "--events-file",
            "events.json",
            "--priority-domains",
            "client.jp",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("1件のメールを取得しました。"));
    assert!(stdout.contains("## メール 1: 見積もりのご確認"));
    assert!(stdout.contains("- 送信者: 田中 (tanaka@client.jp)"));
    assert!(stdout.contains("- 添付ファイル: あり"));
    assert!(stdout.contains("client.jp"));
    assert!(!stdout.contains("既読"));
    assert!(!stdout.contains("未定の打ち合わせ"));
    assert!(reports_in(dir.path()).is_empty());
}

#[test]
fn test_missing_exports_degrade_to_placeholders() {
    let dir = tempdir().unwrap();

    let output = run(&dir, &["--prompt-only"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("メール処理中にエラー"));
    assert!(stdout.contains("予定処理中にエラー"));
    assert!(stdout.contains("未読メールはありません。"));
    assert!(stdout.contains("予定はありません。"));
}

#[test]
fn test_missing_key_exits_cleanly() {
    let dir = tempdir().unwrap();

    let output = run(&dir, &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("API Keyが指定されていないため終了します。"));
    assert!(reports_in(dir.path()).is_empty());
}

#[test]
fn test_unreachable_api_still_saves_report() {
    let dir = tempdir().unwrap();
    write_exports(dir.path());

    let output = run(
        &dir,
        &[
            "--api-key",
            "sk-ant-test",
            "--api-url",
            "http://127.0.0.1:9/v1/messages",
            "--emails-file",
            "emails.json",
            "--output-dir",
            "reports",
        ],
    );

    assert!(output.status.success());
    let reports = reports_in(&dir.path().join("reports"));
    assert_eq!(reports.len(), 1);

    let saved = fs::read_to_string(&reports[0]).unwrap();
    assert!(saved.starts_with("APIの呼び出し中にエラーが発生しました: "));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("秘書レポートを保存しました: "));
    assert!(stdout.contains("========= 秘書レポート ========="));
}

#[test]
fn test_invalid_arguments_fail() {
    let dir = tempdir().unwrap();

    let output = run(&dir, &["--working-hours", "9", "30"]);

    assert!(!output.status.success());
}

#[test]
fn test_email_limit_keeps_newest() {
    let dir = tempdir().unwrap();
    let emails = json!([
        {"subject": "古い連絡", "received_time": "2024-03-01 07:00:00+09:00"},
        {"subject": "新しい連絡", "received_time": "2024-03-01 09:00:00+09:00"}
    ]);
    fs::write(dir.path().join("emails.json"), emails.to_string()).unwrap();

    let output = run(
        &dir,
        &["--prompt-only", "--emails", "1", "--emails-file", "emails.json"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("## メール 1: 新しい連絡"));
    assert!(!stdout.contains("古い連絡"));
}
