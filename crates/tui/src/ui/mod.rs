pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, view::View};
use theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(frame.area());

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.view.current(), &theme);

    match state.view.current() {
        View::Dashboard => screens::dashboard::render(frame, layout[2], state),
        View::Apply => screens::apply::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let snapshot = state.dashboard.snapshot();
    let refresh = snapshot
        .fetched_at
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut line = vec![
        Span::styled("Backend", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Records", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", snapshot.records.len())),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}")),
    ];
    if state.form.is_submitting() {
        line.push(Span::raw("  "));
        line.push(Span::styled(
            "Submitting...",
            Style::default().fg(theme.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context = match state.view.current() {
        View::Dashboard => components::hints::DASHBOARD,
        View::Apply => components::hints::APPLY,
    };
    parts.push(components::hints::hint_separator(theme));
    parts.extend(components::hints::hints_to_spans(context, theme));

    parts.push(components::hints::hint_separator(theme));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" exit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    use super::*;
    use crate::{
        app::{
            RecordSelection,
            dashboard::DashboardController,
            form::{ApplicationFormController, FormField},
            view::ViewCoordinator,
        },
        client::Client,
        test_support::MockBackend,
    };

    async fn state_for(backend: &MockBackend) -> AppState {
        let client = Client::new(&backend.base_url()).unwrap();
        let dashboard = DashboardController::new(client.clone());
        dashboard.refresh().await;
        AppState {
            view: ViewCoordinator::default(),
            dashboard,
            form: ApplicationFormController::default(),
            selection: RecordSelection::default(),
            base_url: client.base_url().to_string(),
        }
    }

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn dashboard_lists_records_and_summary() {
        let backend = MockBackend::start().await;
        backend.set_records(vec![
            json!({
                "id": 1,
                "applicant_name": "John Doe",
                "loan_amount": 250000.0,
                "status": "pending",
                "purpose": "home_purchase"
            }),
            json!({ "id": 2, "applicant_name": "Ann Lee", "loan_amount": 5000.0, "status": "approved" }),
        ]);
        let state = state_for(&backend).await;

        let screen = draw(&state);
        assert!(screen.contains("John Doe"));
        assert!(screen.contains("Ann Lee"));
        assert!(screen.contains("$255,000.00"));
        assert!(screen.contains("home purchase"));
        assert!(screen.contains("Records: 2"));
    }

    #[tokio::test]
    async fn empty_dashboard_shows_placeholder() {
        let backend = MockBackend::start().await;
        let state = state_for(&backend).await;

        assert!(draw(&state).contains("No loan applications yet."));
    }

    #[tokio::test]
    async fn apply_view_shows_fields_and_disabled_button_while_submitting() {
        let backend = MockBackend::start().await;
        let mut state = state_for(&backend).await;
        state.view.switch_to(View::Apply);
        state.form.update_field(FormField::ApplicantName, "Jane Doe");
        state.form.update_field(FormField::LoanAmount, "15000");
        state.form.update_field(FormField::Income, "60000");

        let idle = draw(&state);
        assert!(idle.contains("Credit Score (Optional)"));
        assert!(idle.contains("Jane Doe"));
        assert!(idle.contains("Submit Application"));

        state.form.begin_submit().unwrap();
        let busy = draw(&state);
        assert!(busy.contains("[ Submitting... ]"));
        assert!(!busy.contains("Submit Application"));
    }

    #[tokio::test]
    async fn apply_view_shows_validation_message() {
        let backend = MockBackend::start().await;
        let mut state = state_for(&backend).await;
        state.view.switch_to(View::Apply);
        let _ = state.form.begin_submit();

        assert!(draw(&state).contains("Full Name is required."));
    }
}
