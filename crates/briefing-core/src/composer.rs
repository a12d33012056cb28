//! Prompt composition.
//!
//! Renders normalized emails and events plus the report configuration into
//! the single user message sent to the model. The output depends only on
//! the inputs and the caller-supplied "today" label, so two calls with the
//! same arguments produce byte-identical prompts.

use std::collections::BTreeMap;

use briefing_models::{CalendarEvent, EmailRecord, ReportConfiguration};
use chrono::NaiveDate;

use crate::timestamp::{date_label, parse_event_timestamp, time_label};

/// System-role instruction sent alongside the prompt.
pub const SYSTEM_INSTRUCTION: &str = "あなたは優秀な秘書です。メールや予定表の情報を整理し、優先順位をつけてMarkdown形式で簡潔にまとめてください。重要なタスクを特定し、具体的なアドバイスを提供してください。Markdown形式の見出し、箇条書き、強調などを活用して、読みやすく構造化されたレポートを作成してください。";

/// Emitted in place of the email list when there is nothing unread.
pub const NO_EMAILS_SENTENCE: &str = "未読メールはありません。";

/// Emitted in place of the schedule when there are no events.
pub const NO_EVENTS_SENTENCE: &str = "予定はありません。";

/// Fixed analysis directives appended after the data sections.
const INSTRUCTIONS: &str = r#"
# 分析とレポート作成の指示

## 1. メール分析
- メールを「緊急対応」「今日中に対応」「週内対応」「情報のみ」に分類してください
- 各カテゴリのメールについて簡潔な要約と推奨アクションを提示してください
- 特に優先ドメインや優先キーワードを含むメールに注目してください

## 2. 予定分析
- 今後の予定を時系列で整理し、準備が必要なものを特定してください
- 予定と予定の間の移動時間や準備時間を考慮した現実的なスケジュールを提案してください
- 集中作業時間を確保できるよう、予定の調整案があれば提示してください

## 3. タスク管理
- メールと予定から抽出した具体的なタスクリストを作成してください
- 各タスクに優先度（高/中/低）と対応期限を設定してください
- 「今日必ず完了すべきこと」のショートリスト（3項目以内）を提示してください

## 4. 今後の計画
- 今日から1週間の効率的な業務計画を提案してください
- 重要な締め切りや準備が必要なイベントを強調してください
- 週末までに完了すべき主要タスクを特定してください

秘書としての経験と判断力を活かし、意思決定を支援する具体的で実用的なアドバイスを提供してください。
情報の重要度に応じて簡潔にまとめ、すぐに行動に移せる形式で提示してください。

必ずMarkdown形式でレポートを作成してください。見出し、箇条書き、強調などのMarkdown記法を適切に活用して、読みやすく構造化されたレポートにしてください。
"#;

/// Build the complete prompt.
///
/// # Arguments
/// * `emails` - Normalized unread emails, rendered in the given order
/// * `events` - Normalized events, grouped by day and sorted by start
/// * `config` - Guidelines rendered near the top of the prompt
/// * `today` - Date label for the header, e.g. `2024年03月01日`
pub fn compose_prompt(
    emails: &[EmailRecord],
    events: &[CalendarEvent],
    config: &ReportConfiguration,
    today: &str,
) -> String {
    let mut prompt = String::new();
    push_header(&mut prompt, config, today);
    push_emails(&mut prompt, emails);
    push_events(&mut prompt, events);
    prompt.push_str(INSTRUCTIONS);
    prompt
}

fn push_header(prompt: &mut String, config: &ReportConfiguration, today: &str) {
    prompt.push_str(&format!(
        "\nあなたは経験豊富なエグゼクティブアシスタントです。今日は{}です。\n",
        today
    ));
    prompt.push_str(
        "以下の情報を基に、効率的なタスク管理と意思決定をサポートするレポートを作成してください。\n\n",
    );

    prompt.push_str("# 分析のためのガイドライン\n");
    prompt.push_str(&format!(
        "- 優先ドメイン: {}\n",
        config.priority_domains.join(", ")
    ));
    prompt.push_str(&format!(
        "- 優先キーワード: {}\n",
        config.priority_keywords.join(", ")
    ));
    prompt.push_str(&format!(
        "- 勤務時間: {}時～{}時\n",
        config.working_hours.start, config.working_hours.end
    ));
    prompt.push_str(&format!(
        "- 集中作業時間: {}時～{}時\n",
        config.focus_time.start, config.focus_time.end
    ));
    prompt.push_str(&format!("- レポートスタイル: {}\n", config.report_style));
}

fn push_emails(prompt: &mut String, emails: &[EmailRecord]) {
    prompt.push_str(&format!("\n# 未読メール（最新{}件）\n", emails.len()));

    if emails.is_empty() {
        prompt.push_str(NO_EMAILS_SENTENCE);
        prompt.push_str("\n\n");
        return;
    }

    for (i, email) in emails.iter().enumerate() {
        prompt.push_str(&format!("\n## メール {}: {}\n", i + 1, email.subject));
        prompt.push_str(&format!(
            "- 送信者: {} ({})\n",
            email.sender_name, email.sender_email
        ));
        prompt.push_str(&format!("- 受信日時: {}\n", email.received_at));
        prompt.push_str(&format!(
            "- 添付ファイル: {}\n",
            if email.has_attachments { "あり" } else { "なし" }
        ));
        prompt.push_str(&format!("\n{}\n\n", email.body_preview()));
    }
}

/// Events keyed by the calendar day of their start.
///
/// Events whose start does not parse are left out.
fn group_by_day(events: &[CalendarEvent]) -> BTreeMap<NaiveDate, Vec<&CalendarEvent>> {
    let mut days: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        if let Some(start) = parse_event_timestamp(&event.start) {
            days.entry(start.date()).or_default().push(event);
        }
    }
    for day_events in days.values_mut() {
        day_events.sort_by(|a, b| a.start.cmp(&b.start));
    }
    days
}

fn push_events(prompt: &mut String, events: &[CalendarEvent]) {
    prompt.push_str(&format!("\n# 今後{}件の予定\n", events.len()));

    if events.is_empty() {
        prompt.push_str(NO_EVENTS_SENTENCE);
        prompt.push_str("\n\n");
        return;
    }

    for (day, day_events) in group_by_day(events) {
        prompt.push_str(&format!("\n## {}\n", date_label(day)));

        for event in day_events {
            push_event(prompt, event);
        }
    }
}

fn push_event(prompt: &mut String, event: &CalendarEvent) {
    let (Some(start), Some(end)) = (
        parse_event_timestamp(&event.start),
        parse_event_timestamp(&event.end),
    ) else {
        prompt.push_str(&format!("- {}\n", event.subject));
        return;
    };

    prompt.push_str(&format!(
        "\n- {}～{} {}\n",
        time_label(&start),
        time_label(&end),
        event.subject
    ));
    prompt.push_str(&format!("  場所: {}\n", event.location));
    if let Some(url) = &event.meeting_url {
        prompt.push_str(&format!("  オンライン会議URL: {}\n", url));
    }
    if let Some(attendees) = &event.required_attendees {
        prompt.push_str(&format!("  参加者: {}\n", attendees));
    }
}
