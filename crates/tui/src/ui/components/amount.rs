use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats a dollar amount with thousands separators, e.g. `$15,000.00`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Amount column text; `-` when the backend did not send one.
pub fn format_optional_usd(amount: Option<f64>) -> String {
    amount.map(format_usd).unwrap_or_else(|| "-".to_string())
}

/// Colors a loan status by how far along the decision is.
pub fn styled_status(status: Option<&str>, theme: &Theme) -> Span<'static> {
    let Some(status) = status else {
        return Span::styled("-", Style::default().fg(theme.text_muted));
    };
    let color = match status {
        "approved" | "funded" => theme.positive,
        "rejected" | "denied" | "withdrawn" => theme.error,
        "pending" | "submitted" | "under_review" => theme.warning,
        _ => theme.text,
    };
    Span::styled(status.replace('_', " "), Style::default().fg(color))
}
