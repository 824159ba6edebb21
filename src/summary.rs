//! WhatsApp-formatted text summary of a single record.
//!
//! Plain-text rendering meant to be pasted into a chat: bold markers are
//! WhatsApp asterisks, ratings get traffic-light icons, and the keep/improve
//! lists are capped at three entries each.

use crate::config::DrillmapConfig;
use crate::core::normalize::{read_role, read_sector};
use crate::core::score::compute_scores;
use crate::core::types::{AuditRatings, Rating, ReviewRecord};
use crate::formatting::{fmt_timestamp, icon, rating_display, PLACEHOLDER};

const LIST_CAP: usize = 3;

pub fn build_whatsapp_text(record: &ReviewRecord, config: &DrillmapConfig) -> String {
    let meta = record.meta.as_ref();
    let mut lines = Vec::new();

    let title = record.record_type.as_deref().unwrap_or("דוח");
    lines.push(format!("📋 *סיכום {title}*"));
    lines.push(format!(
        "🕒 {}",
        fmt_timestamp(record.event_at.as_ref().or(record.created_at.as_ref()))
    ));
    lines.push(format!("📍 גזרה: {}", or_placeholder(&read_sector(record))));
    lines.push(format!(
        "👤 מבצע: {} ({})",
        meta.and_then(|m| m.name.as_deref()).unwrap_or(PLACEHOLDER),
        or_placeholder(&read_role(record))
    ));
    lines.push(format!(
        "🧩 כוח: {}",
        meta.and_then(|m| m.force.as_deref()).unwrap_or(PLACEHOLDER)
    ));

    let is_audit = record.record_type.as_deref() == Some(config.audit_type.as_str());
    if is_audit {
        if let Some(audit) = &record.audit {
            push_score_lines(&mut lines, audit, config);
        }
    } else if let Some(description) = non_empty(record.exercise_description.as_deref()) {
        lines.push(String::new());
        lines.push("📝 תיאור התרגול:".to_string());
        lines.push(description.to_string());
    }

    if let Some(gaps) = non_empty(record.gaps.as_deref()) {
        lines.push(String::new());
        lines.push("⚠️ פערים שעלו מהכוח:".to_string());
        lines.push(gaps.to_string());
    }

    if let Some(notes) = non_empty(record.notes.as_deref()) {
        lines.push(String::new());
        lines.push("📝 הערות:".to_string());
        lines.push(notes.to_string());
    }

    push_list(&mut lines, "✅ נק׳ לשימור:", record.keep.as_deref());
    push_list(&mut lines, "🛠️ נק׳ לשיפור:", record.improve.as_deref());

    lines.join("\n")
}

fn push_score_lines(lines: &mut Vec<String>, audit: &AuditRatings, config: &DrillmapConfig) {
    let score = compute_scores(audit, &config.weights);

    lines.push(String::new());
    match score.overall_100 {
        Some(overall) => lines.push(format!("⭐ *ציונים* | ציון סופי: *{overall}*")),
        None => lines.push("⭐ *ציונים*".to_string()),
    }

    let pct = |w: f64| (w * 100.0).round() as u32;
    lines.push(format!("📌 *מבצעיות ({}%)*", pct(config.weights.operational)));
    push_rating(lines, "מיקום+שפה+גזרה", &audit.pos_sector);
    push_rating(lines, "תדריך משימה", &audit.mission_briefing);
    push_rating(lines, "היסטוריה גזרתית", &audit.sector_history);
    push_rating(lines, "הבנת האיום", &audit.threat_understanding);
    push_rating(lines, "נראות ודיגום", &audit.appearance);
    push_rating(lines, "עקרון המאמ״ץ", &audit.effort);
    push_rating(lines, "תרגולות ומקת״גים", &audit.drills);
    push_rating(lines, "הופ״א", &audit.roe);

    lines.push(format!("📌 *תקשוב ({}%)*", pct(config.weights.technical)));
    push_rating(lines, "ליונט/אלפ״א/תיק משימה", &audit.systems);
    push_rating(lines, "קשר", &audit.communication);

    lines.push(format!("📌 *מודיעין ({}%)*", pct(config.weights.intelligence)));
    push_rating(lines, "עזרים בעמדה", &audit.intel_tools);

    lines.push(format!("📌 *רפואה ({}%)*", pct(config.weights.medical)));
    push_rating(lines, "רפואה", &audit.medical);

    let training = audit.force_training.as_ref();
    let trained = match training.and_then(|t| t.trained.as_deref()) {
        Some("yes") => "כן",
        Some("no") => "לא",
        _ => PLACEHOLDER,
    };
    let kind = match training.and_then(|t| t.training_type.as_deref()) {
        Some("methodical") => "מתודי",
        Some("practical") => "מעשי",
        _ => PLACEHOLDER,
    };
    if trained == "כן" {
        lines.push(format!("🎯 תרגול הכוח: {trained} ({kind})"));
    } else {
        lines.push(format!("🎯 תרגול הכוח: {trained}"));
    }
}

fn push_rating(lines: &mut Vec<String>, label: &str, rating: &Option<Rating>) {
    let value = rating.as_ref().and_then(Rating::numeric);
    lines.push(format!(
        "• {label}: {} ({})",
        icon(value),
        rating_display(rating.as_ref())
    ));
}

fn push_list(lines: &mut Vec<String>, header: &str, items: Option<&[String]>) {
    let items = items.unwrap_or(&[]);
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(header.to_string());
    for (i, item) in items.iter().take(LIST_CAP).enumerate() {
        lines.push(format!("{}. {item}", i + 1));
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn or_placeholder(s: &str) -> &str {
    if s.is_empty() {
        PLACEHOLDER
    } else {
        s
    }
}
