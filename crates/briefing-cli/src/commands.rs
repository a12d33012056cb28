//! The numbered briefing run.

use std::io;

use briefing_core::{
    complete_prompt, compose_prompt, failure_report, fetch_emails, fetch_events, AnthropicClient,
    AppConfig, JsonExportSource,
};
use briefing_models::ReportConfiguration;
use briefing_persistence::ReportStore;
use chrono::Local;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::{preview, prompt_api_key, Result, PREVIEW_CHARS};

/// Date format used for "today" in the prompt header.
const TODAY_FORMAT: &str = "%Y年%m月%d日";

/// Run the briefing described by the parsed arguments.
pub fn run(cli: &Cli) -> Result<()> {
    println!("Outlook秘書アシスタント");
    println!("{}", "=".repeat(40));

    let mut app = AppConfig::resolve(
        cli.api_key.clone(),
        cli.api_version.clone(),
        cli.model.clone(),
    );
    if let Some(url) = &cli.api_url {
        app = app.with_api_url(url.as_str());
    }

    // The key is only needed for the remote call.
    if !app.has_api_key() && !cli.prompt_only {
        match prompt_api_key(&mut io::stdin().lock(), &mut io::stdout())? {
            Some(key) => app = app.with_api_key(key),
            None => {
                println!("API Keyが指定されていないため終了します。");
                return Ok(());
            }
        }
    }

    let config = ReportConfiguration::with_overrides(cli.report_overrides());
    debug!(?config, "Report configuration");

    let source = JsonExportSource::new(cli.emails_path(), cli.events_path());
    let options = cli.fetch_options();

    println!("\n1. 未読メールを最大{}件取得します...", options.email_limit);
    let emails = fetch_emails(&source, options.email_limit);
    match &emails.error {
        None => println!("  {}件のメールを取得しました。", emails.records.len()),
        Some(e) => println!("  メール処理中にエラー: {}", e),
    }

    println!("\n2. 今後{}日間の予定を取得します...", options.days_ahead);
    let events = fetch_events(&source, options.days_ahead);
    match &events.error {
        None => println!("  {}件の予定を取得しました。", events.records.len()),
        Some(e) => println!("  予定処理中にエラー: {}", e),
    }

    let degraded = emails.diagnostics.len() + events.diagnostics.len();
    if degraded > 0 {
        info!(count = degraded, "Some records were normalized with defaults");
    }

    println!("\n3. 秘書アシスタント用のプロンプトを作成しています...");
    let today = Local::now().format(TODAY_FORMAT).to_string();
    let prompt = compose_prompt(&emails.records, &events.records, &config, &today);

    if cli.prompt_only {
        println!("\n{}", prompt);
        return Ok(());
    }

    println!("\n4. Claude APIを呼び出しています...");
    println!("  APIからの応答を待っています...");
    let report = match AnthropicClient::new(&app) {
        Ok(client) => complete_prompt(&client, &app, &prompt),
        Err(e) => failure_report(&e),
    };

    println!("\n5. 秘書レポートを保存しています...");
    let store = ReportStore::new(cli.report_dir());
    let path = store.save(&report)?;

    println!("\n秘書レポートを保存しました: {}", path.display());
    println!("\n========= 秘書レポート =========");
    println!("{}", preview(&report, PREVIEW_CHARS));
    println!("================================");
    println!("\nレポート全文は保存されたファイルで確認できます。");

    Ok(())
}
