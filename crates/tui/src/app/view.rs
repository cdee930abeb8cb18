#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Apply,
}

impl View {
    pub const ALL: [Self; 2] = [Self::Dashboard, Self::Apply];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Apply => "Apply for Loan",
        }
    }

    pub fn shortcut(self) -> &'static str {
        match self {
            Self::Dashboard => "F1",
            Self::Apply => "F2",
        }
    }
}

/// Which view is on screen. No history is kept.
#[derive(Debug, Default)]
pub struct ViewCoordinator {
    current: View,
}

impl ViewCoordinator {
    pub fn current(&self) -> View {
        self.current
    }

    pub fn switch_to(&mut self, view: View) {
        if self.current != view {
            tracing::debug!(from = ?self.current, to = ?view, "switching view");
        }
        self.current = view;
    }
}
