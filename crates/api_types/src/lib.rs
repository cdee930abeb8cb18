use serde::{Deserialize, Serialize};

pub mod loan {
    use super::*;

    /// Employment status of the applicant.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EmploymentStatus {
        #[default]
        Employed,
        SelfEmployed,
        Unemployed,
        Retired,
    }

    impl EmploymentStatus {
        pub const ALL: [Self; 4] = [
            Self::Employed,
            Self::SelfEmployed,
            Self::Unemployed,
            Self::Retired,
        ];

        /// Returns the token used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Employed => "employed",
                Self::SelfEmployed => "self_employed",
                Self::Unemployed => "unemployed",
                Self::Retired => "retired",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Employed => "Employed",
                Self::SelfEmployed => "Self Employed",
                Self::Unemployed => "Unemployed",
                Self::Retired => "Retired",
            }
        }

        pub fn parse(token: &str) -> Option<Self> {
            Self::ALL.into_iter().find(|status| status.as_str() == token)
        }
    }

    /// What the loan is for.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum LoanPurpose {
        #[default]
        HomePurchase,
        Refinance,
        DebtConsolidation,
        HomeImprovement,
        Business,
        Other,
    }

    impl LoanPurpose {
        pub const ALL: [Self; 6] = [
            Self::HomePurchase,
            Self::Refinance,
            Self::DebtConsolidation,
            Self::HomeImprovement,
            Self::Business,
            Self::Other,
        ];

        /// Returns the token used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::HomePurchase => "home_purchase",
                Self::Refinance => "refinance",
                Self::DebtConsolidation => "debt_consolidation",
                Self::HomeImprovement => "home_improvement",
                Self::Business => "business",
                Self::Other => "other",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::HomePurchase => "Home Purchase",
                Self::Refinance => "Refinance",
                Self::DebtConsolidation => "Debt Consolidation",
                Self::HomeImprovement => "Home Improvement",
                Self::Business => "Business",
                Self::Other => "Other",
            }
        }

        pub fn parse(token: &str) -> Option<Self> {
            Self::ALL.into_iter().find(|purpose| purpose.as_str() == token)
        }
    }

    /// Request body for `POST /api/v1/loans`.
    ///
    /// `credit_score` is always serialized, as `null` when absent.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct LoanApplicationPayload {
        pub applicant_name: String,
        pub loan_amount: f64,
        pub income: f64,
        pub employment_status: EmploymentStatus,
        pub credit_score: Option<i64>,
        pub purpose: LoanPurpose,
    }

    /// A loan record as returned by `GET /api/v1/loans`.
    ///
    /// Backends disagree on the exact shape, so every field is optional and
    /// unknown fields are ignored. Nothing in the client depends on these
    /// values beyond displaying them.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LoanRecord {
        /// Numeric or string id, depending on the backend.
        pub id: Option<serde_json::Value>,
        pub loan_number: Option<String>,
        pub applicant_name: Option<String>,
        pub loan_amount: Option<f64>,
        #[serde(alias = "annual_income")]
        pub income: Option<f64>,
        pub employment_status: Option<String>,
        pub status: Option<String>,
        pub application_date: Option<String>,
        pub credit_score: Option<i64>,
        pub purpose: Option<String>,
    }

    impl LoanRecord {
        /// Short identifier for list rows: loan number, then id, then `-`.
        pub fn display_id(&self) -> String {
            if let Some(number) = self.loan_number.as_deref() {
                return number.to_string();
            }
            match &self.id {
                Some(serde_json::Value::String(id)) => id.clone(),
                Some(serde_json::Value::Null) | None => "-".to_string(),
                Some(other) => other.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::loan::*;
    use serde_json::json;

    #[test]
    fn payload_serializes_missing_credit_score_as_null() {
        let payload = LoanApplicationPayload {
            applicant_name: "Jane Doe".to_string(),
            loan_amount: 15000.0,
            income: 60000.0,
            employment_status: EmploymentStatus::SelfEmployed,
            credit_score: None,
            purpose: LoanPurpose::DebtConsolidation,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "applicant_name": "Jane Doe",
                "loan_amount": 15000.0,
                "income": 60000.0,
                "employment_status": "self_employed",
                "credit_score": null,
                "purpose": "debt_consolidation"
            })
        );
    }

    #[test]
    fn wire_tokens_match_serde_names() {
        for status in EmploymentStatus::ALL {
            let value = serde_json::to_value(status).unwrap();
            assert_eq!(value, json!(status.as_str()));
            assert_eq!(EmploymentStatus::parse(status.as_str()), Some(status));
        }
        for purpose in LoanPurpose::ALL {
            let value = serde_json::to_value(purpose).unwrap();
            assert_eq!(value, json!(purpose.as_str()));
            assert_eq!(LoanPurpose::parse(purpose.as_str()), Some(purpose));
        }
        assert_eq!(LoanPurpose::parse("vacation"), None);
    }

    #[test]
    fn defaults_match_form_defaults() {
        assert_eq!(EmploymentStatus::default(), EmploymentStatus::Employed);
        assert_eq!(LoanPurpose::default(), LoanPurpose::HomePurchase);
    }

    #[test]
    fn record_accepts_database_backend_shape() {
        let record: LoanRecord = serde_json::from_value(json!({
            "id": "7f0c",
            "loan_number": "LN-2024-0001",
            "applicant_name": "John Doe",
            "loan_amount": 250000.0,
            "annual_income": 75000.0,
            "employment_status": "employed",
            "status": "pending",
            "application_date": "2024-01-15T10:00:00",
            "purpose": "home_purchase",
            "property_value": 300000.0
        }))
        .unwrap();

        assert_eq!(record.income, Some(75000.0));
        assert_eq!(record.status.as_deref(), Some("pending"));
        assert_eq!(record.display_id(), "LN-2024-0001");
    }

    #[test]
    fn record_accepts_minimal_shape() {
        let record: LoanRecord = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(record.display_id(), "3");
        assert_eq!(record.applicant_name, None);

        let empty: LoanRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.display_id(), "-");
    }
}
