use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{
        AppState,
        form::{ApplicationFormController, FormField, SubmissionState},
    },
    ui::{components::card::Card, theme::Theme},
};

const FORM_WIDTH: u16 = 56;
// Two rows per field, spacer, button, message, borders.
const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 * 2 + 5;

fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.form;

    let card_area = centered_box(FORM_WIDTH, FORM_HEIGHT, area);
    frame.render_widget(Clear, card_area);

    let block = Card::new("Apply for a Loan", &theme).focused(true).block();
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = form.focus() == field;
        let label_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text_muted)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));
        lines.push(field_line(form, field, focused, &theme));
    }

    lines.push(Line::from(""));
    lines.push(submit_button(form.state(), &theme));
    if let Some(message) = form.message() {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.error),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(
    form: &ApplicationFormController,
    field: FormField,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let draft = form.draft();
    let value = match field {
        FormField::ApplicantName => draft.applicant_name.clone(),
        FormField::LoanAmount => draft.loan_amount.clone(),
        FormField::Income => draft.income.clone(),
        FormField::CreditScore => draft.credit_score.clone(),
        FormField::EmploymentStatus => draft.employment_status.label().to_string(),
        FormField::Purpose => draft.purpose.label().to_string(),
    };

    let style = if focused {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.text_muted)
    };

    if field.is_choice() {
        let arrow = Style::default().fg(if focused { theme.accent } else { theme.border });
        return Line::from(vec![
            Span::raw("  "),
            Span::styled("‹ ", arrow),
            Span::styled(value, style),
            Span::styled(" ›", arrow),
        ]);
    }

    let cursor = if focused { "│" } else { "" };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(value, style),
        Span::styled(cursor, Style::default().fg(theme.accent)),
    ])
}

/// The button is greyed out while a submission is in flight.
fn submit_button(state: SubmissionState, theme: &Theme) -> Line<'static> {
    let (label, style) = match state {
        SubmissionState::Submitting => ("[ Submitting... ]", Style::default().fg(theme.text_muted)),
        SubmissionState::Idle => (
            "[ Submit Application ]",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    };
    Line::from(Span::styled(label, style)).alignment(Alignment::Center)
}
