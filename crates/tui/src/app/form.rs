use api_types::loan::{EmploymentStatus, LoanApplicationPayload, LoanPurpose};
use thiserror::Error;

use crate::app::submission::SubmitError;

pub const CREDIT_SCORE_MIN: i64 = 300;
pub const CREDIT_SCORE_MAX: i64 = 850;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    ApplicantName,
    LoanAmount,
    Income,
    EmploymentStatus,
    CreditScore,
    Purpose,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::ApplicantName,
        Self::LoanAmount,
        Self::Income,
        Self::EmploymentStatus,
        Self::CreditScore,
        Self::Purpose,
    ];

    /// Payload key for this field.
    pub fn name(self) -> &'static str {
        match self {
            Self::ApplicantName => "applicant_name",
            Self::LoanAmount => "loan_amount",
            Self::Income => "income",
            Self::EmploymentStatus => "employment_status",
            Self::CreditScore => "credit_score",
            Self::Purpose => "purpose",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ApplicantName => "Full Name",
            Self::LoanAmount => "Loan Amount ($)",
            Self::Income => "Annual Income ($)",
            Self::EmploymentStatus => "Employment Status",
            Self::CreditScore => "Credit Score (Optional)",
            Self::Purpose => "Loan Purpose",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, Self::EmploymentStatus | Self::Purpose)
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

/// Uncommitted form state. Numeric fields hold exactly what was typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanApplicationDraft {
    pub applicant_name: String,
    pub loan_amount: String,
    pub income: String,
    pub employment_status: EmploymentStatus,
    pub credit_score: String,
    pub purpose: LoanPurpose,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Full Name is required.")]
    MissingName,
    #[error("{} is required.", .0.label())]
    Required(FormField),
    #[error("{} must be a number.", .0.label())]
    NotANumber(FormField),
    #[error("{} cannot be negative.", .0.label())]
    Negative(FormField),
    #[error("Credit Score must be between 300 and 850.")]
    CreditScoreOutOfRange,
}

impl LoanApplicationDraft {
    /// Coerces the draft into the wire payload.
    ///
    /// Amounts go through a float parse, the credit score through a
    /// truncating integer parse, and a blank credit score becomes `None`.
    pub fn coerce(&self) -> Result<LoanApplicationPayload, FormError> {
        if self.applicant_name.trim().is_empty() {
            return Err(FormError::MissingName);
        }

        Ok(LoanApplicationPayload {
            applicant_name: self.applicant_name.clone(),
            loan_amount: parse_amount(FormField::LoanAmount, &self.loan_amount)?,
            income: parse_amount(FormField::Income, &self.income)?,
            employment_status: self.employment_status,
            credit_score: parse_credit_score(&self.credit_score)?,
            purpose: self.purpose,
        })
    }
}

fn parse_number(field: FormField, raw: &str) -> Result<f64, FormError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| FormError::NotANumber(field))?;
    if !value.is_finite() {
        return Err(FormError::NotANumber(field));
    }
    Ok(value)
}

fn parse_amount(field: FormField, raw: &str) -> Result<f64, FormError> {
    if raw.trim().is_empty() {
        return Err(FormError::Required(field));
    }
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(FormError::Negative(field));
    }
    Ok(value)
}

fn parse_credit_score(raw: &str) -> Result<Option<i64>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let score = parse_number(FormField::CreditScore, raw)?.trunc() as i64;
    if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&score) {
        return Err(FormError::CreditScoreOutOfRange);
    }
    Ok(Some(score))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Why `begin_submit` did not start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A create request is already in flight.
    InFlight,
    Invalid(FormError),
}

#[derive(Debug, Default)]
pub struct ApplicationFormController {
    draft: LoanApplicationDraft,
    state: SubmissionState,
    focus: FormField,
    message: Option<String>,
}

impl ApplicationFormController {
    pub fn draft(&self) -> &LoanApplicationDraft {
        &self.draft
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Validation message from the last rejected submit, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Called when the apply view is entered. A fresh draft is created unless
    /// a submission is still in flight.
    pub fn enter(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.draft = LoanApplicationDraft::default();
        self.focus = FormField::default();
        self.message = None;
    }

    /// Stores `raw` as the field's value. Choice fields take the wire token
    /// and ignore anything unknown.
    pub fn update_field(&mut self, field: FormField, raw: &str) {
        tracing::trace!(field = field.name(), "field updated");
        match field {
            FormField::ApplicantName => self.draft.applicant_name = raw.to_string(),
            FormField::LoanAmount => self.draft.loan_amount = raw.to_string(),
            FormField::Income => self.draft.income = raw.to_string(),
            FormField::CreditScore => self.draft.credit_score = raw.to_string(),
            FormField::EmploymentStatus => {
                if let Some(status) = EmploymentStatus::parse(raw) {
                    self.draft.employment_status = status;
                }
            }
            FormField::Purpose => {
                if let Some(purpose) = LoanPurpose::parse(raw) {
                    self.draft.purpose = purpose;
                }
            }
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.index() + 1) % FormField::ALL.len();
        self.focus = FormField::ALL[next];
    }

    pub fn focus_prev(&mut self) {
        let len = FormField::ALL.len();
        let prev = (self.focus.index() + len - 1) % len;
        self.focus = FormField::ALL[prev];
    }

    /// Types one character into the focused field, applying the same
    /// character restrictions as the input widget.
    pub fn push_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let field = self.focus;
        let Some(value) = self.text_value(field) else {
            return;
        };
        let accepted = match field {
            FormField::ApplicantName => true,
            FormField::LoanAmount | FormField::Income => {
                ch.is_ascii_digit() || (ch == '.' && !value.contains('.'))
            }
            FormField::CreditScore => ch.is_ascii_digit(),
            FormField::EmploymentStatus | FormField::Purpose => false,
        };
        if accepted {
            let mut next = value.to_string();
            next.push(ch);
            self.update_field(field, &next);
        }
    }

    pub fn pop_char(&mut self) {
        let field = self.focus;
        if let Some(value) = self.text_value(field) {
            let mut next = value.to_string();
            next.pop();
            self.update_field(field, &next);
        }
    }

    /// Steps the focused choice field to the next or previous option.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            FormField::EmploymentStatus => {
                let next = cycle(
                    &EmploymentStatus::ALL,
                    self.draft.employment_status,
                    forward,
                );
                self.update_field(FormField::EmploymentStatus, next.as_str());
            }
            FormField::Purpose => {
                let next = cycle(&LoanPurpose::ALL, self.draft.purpose, forward);
                self.update_field(FormField::Purpose, next.as_str());
            }
            _ => {}
        }
    }

    fn text_value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::ApplicantName => Some(&self.draft.applicant_name),
            FormField::LoanAmount => Some(&self.draft.loan_amount),
            FormField::Income => Some(&self.draft.income),
            FormField::CreditScore => Some(&self.draft.credit_score),
            FormField::EmploymentStatus | FormField::Purpose => None,
        }
    }

    /// `idle -> submitting`. Returns the coerced payload to dispatch.
    ///
    /// While a submission is in flight this is a no-op. An invalid draft
    /// leaves the state idle and the draft untouched.
    pub fn begin_submit(&mut self) -> Result<LoanApplicationPayload, SubmitRejected> {
        if self.is_submitting() {
            tracing::debug!("submit ignored: a submission is already in flight");
            return Err(SubmitRejected::InFlight);
        }

        match self.draft.coerce() {
            Ok(payload) => {
                self.message = None;
                self.state = SubmissionState::Submitting;
                Ok(payload)
            }
            Err(err) => {
                self.message = Some(err.to_string());
                Err(SubmitRejected::Invalid(err))
            }
        }
    }

    /// `submitting -> idle`. The draft is reset only on success; failures
    /// are logged and otherwise invisible.
    pub fn finish_submit(&mut self, result: &Result<(), SubmitError>) {
        match result {
            Ok(()) => {
                self.draft = LoanApplicationDraft::default();
                self.focus = FormField::default();
            }
            Err(err) => tracing::warn!(%err, "error submitting application"),
        }
        self.state = SubmissionState::Idle;
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    options[next]
}
