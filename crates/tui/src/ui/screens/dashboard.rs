use std::collections::BTreeMap;

use api_types::loan::LoanRecord;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            amount::{format_optional_usd, format_usd, styled_status},
            card::Card,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let records = state.dashboard.records();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_summary(frame, layout[0], &records, &theme);

    if records.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No loan applications yet.",
            Style::default().fg(theme.text_muted),
        )))
        .alignment(Alignment::Center)
        .block(Card::new("Loan Applications", &theme).block());
        frame.render_widget(empty, layout[1]);
        return;
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);

    let selected = state.selection.clamped(records.len());
    render_list(frame, body[0], &records, selected, &theme);
    if let Some(record) = selected.and_then(|idx| records.get(idx)) {
        render_detail(frame, body[1], record, &theme);
    }
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, records: &[LoanRecord], theme: &Theme) {
    let requested: f64 = records.iter().filter_map(|r| r.loan_amount).sum();

    let mut by_status: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *by_status
            .entry(record.status.as_deref().unwrap_or("unknown"))
            .or_default() += 1;
    }

    let mut line = vec![
        Span::styled("Applications", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}   ", records.len())),
        Span::styled("Requested", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}", format_usd(requested))),
    ];
    for (status, count) in by_status {
        line.push(Span::raw("   "));
        line.push(styled_status(Some(status), theme));
        line.push(Span::raw(format!(" {count}")));
    }

    let summary = Paragraph::new(Line::from(line)).block(Card::new("Overview", theme).block());
    frame.render_widget(summary, area);
}

fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    records: &[LoanRecord],
    selected: Option<usize>,
    theme: &Theme,
) {
    let items = records
        .iter()
        .map(|record| {
            let id = record.display_id();
            let name = record.applicant_name.as_deref().unwrap_or("Unknown");
            let amount = format_optional_usd(record.loan_amount);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{id:<14} {name:<22} {amount:>14}  ")),
                styled_status(record.status.as_deref(), theme),
            ]))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(selected);

    let list = List::new(items)
        .block(Card::new("Loan Applications", theme).focused(true).block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(frame: &mut Frame<'_>, area: Rect, record: &LoanRecord, theme: &Theme) {
    let text = |value: Option<&str>| value.unwrap_or("-").to_string();
    let token = |value: Option<&str>| value.unwrap_or("-").replace('_', " ");
    let credit_score = record
        .credit_score
        .map(|score| score.to_string())
        .unwrap_or_else(|| "-".to_string());

    let rows = [
        ("Loan", record.display_id()),
        ("Applicant", text(record.applicant_name.as_deref())),
        ("Amount", format_optional_usd(record.loan_amount)),
        ("Income", format_optional_usd(record.income)),
        ("Employment", token(record.employment_status.as_deref())),
        ("Credit score", credit_score),
        ("Purpose", token(record.purpose.as_deref())),
        ("Applied", text(record.application_date.as_deref())),
    ];

    let mut lines = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<13}"), Style::default().fg(theme.text_muted)),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(vec![
        Span::styled(format!("{:<13}", "Status"), Style::default().fg(theme.text_muted)),
        styled_status(record.status.as_deref(), theme),
    ]));

    let detail = Paragraph::new(lines).block(Card::new("Application", theme).block());
    frame.render_widget(detail, area);
}
