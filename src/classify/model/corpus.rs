//! Seed training corpus
//!
//! The statistical classifiers train at startup on a small labeled
//! corpus of column names and representative cell values. The corpus is
//! compiled in, but callers can substitute their own before the model
//! is trained.

use crate::domain::{Result, RiskLevel};

/// Labeled training corpus for the column-name and value classifiers
#[derive(Debug, Clone)]
pub struct TrainingCorpus {
    /// Column-name examples with their risk labels
    pub column_names: Vec<(String, RiskLevel)>,
    /// Representative cell-value examples with their risk labels
    pub value_patterns: Vec<(String, RiskLevel)>,
}

impl TrainingCorpus {
    /// The built-in seed corpus
    pub fn seed() -> Self {
        use RiskLevel::{High, Low, Medium};

        let names = |entries: &[&str], level: RiskLevel| {
            entries
                .iter()
                .map(move |&e| (e.to_string(), level))
                .collect::<Vec<_>>()
        };

        let mut column_names = names(
            &[
                "ssn",
                "social_security_number",
                "social_insurance_number",
                "sin",
                "credit_card_number",
                "creditcard",
                "cc_num",
                "card_number",
                "passport_number",
                "passport_id",
                "drivers_license",
                "license_number",
                "medical_record_number",
                "mrn",
                "patient_id",
                "health_id",
                "bank_account",
                "iban",
                "routing_number",
                "account_number",
                "insurance_policy",
                "policy_number",
                "diagnosis_code",
            ],
            High,
        );
        column_names.extend(names(
            &[
                "email",
                "email_address",
                "phone_number",
                "phone",
                "mobile",
                "date_of_birth",
                "dob",
                "birth_date",
                "birthdate",
                "address",
                "street_address",
                "home_address",
                "mailing_address",
                "postal_code",
                "zip_code",
                "city",
                "state",
                "province",
                "ip_address",
                "ip",
                "location",
                "latitude",
                "longitude",
                "first_name",
                "last_name",
                "full_name",
                "name",
            ],
            Medium,
        ));
        column_names.extend(names(
            &[
                "id",
                "customer_id",
                "order_id",
                "product_id",
                "item_id",
                "quantity",
                "price",
                "amount",
                "total",
                "subtotal",
                "category",
                "type",
                "status",
                "description",
                "notes",
                "created_date",
                "updated_date",
                "modified_date",
                "department",
                "division",
                "company",
                "organization",
            ],
            Low,
        ));

        let mut value_patterns = names(
            &[
                "123-45-6789",
                "123456789",
                "4532-1234-5678-9012",
                "4532123456789012",
                "P1234567",
                "DL12345678",
                "MRN-123456",
                "POL-987654321",
                "12345678901234567890",
                "ACC-123456789",
            ],
            High,
        );
        value_patterns.extend(names(
            &[
                "john.doe@example.com",
                "user@domain.com",
                "+1-555-123-4567",
                "(555) 123-4567",
                "1990-01-01",
                "01/01/1990",
                "123 Main St",
                "M5H 2N2",
                "10001",
                "192.168.1.1",
                "40.7128,-74.0060",
                "John",
                "Smith",
                "John Smith",
            ],
            Medium,
        ));
        value_patterns.extend(names(
            &[
                "CUST001",
                "ORD-12345",
                "PROD-001",
                "IT001",
                "100",
                "29.99",
                "1234.56",
                "Electronics",
                "Active",
                "2023-01-01 10:00:00",
                "Engineering",
                "Acme Corp",
            ],
            Low,
        ));

        Self {
            column_names,
            value_patterns,
        }
    }

    /// Check that the corpus can support training: both sides must be
    /// non-empty and cover at least two distinct risk labels.
    pub fn validate(&self) -> Result<()> {
        use crate::domain::PrivsenseError;

        for (side, entries) in [
            ("column_names", &self.column_names),
            ("value_patterns", &self.value_patterns),
        ] {
            if entries.is_empty() {
                return Err(PrivsenseError::Model(format!(
                    "training corpus has no {side} entries"
                )));
            }
            let mut seen = [false; RiskLevel::ALL.len()];
            for (_, level) in entries {
                seen[level.class_index()] = true;
            }
            if seen.iter().filter(|&&s| s).count() < 2 {
                return Err(PrivsenseError::Model(format!(
                    "training corpus {side} needs at least two distinct risk labels"
                )));
            }
        }
        Ok(())
    }

    /// Split one side of the corpus into texts and class indices
    pub(crate) fn unzip(entries: &[(String, RiskLevel)]) -> (Vec<String>, Vec<usize>) {
        entries
            .iter()
            .map(|(text, level)| (text.clone(), level.class_index()))
            .unzip()
    }
}

impl Default for TrainingCorpus {
    fn default() -> Self {
        Self::seed()
    }
}
