//! Employee entity definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::query::parse_strict_date;
use crate::types::errors::{DirectoryError, DirectoryResult};

/// A row in the employee directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub role: String,
    pub salary: i64,
    pub join_date: NaiveDate,
    pub years_of_experience: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Integer input that clients send either as a JSON number or as a numeric
/// string. [`NumericInput::normalize`] produces the strict integer; anything
/// else is a validation error on the named field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(i64),
    Text(String),
}

impl NumericInput {
    pub fn normalize(&self, field: &'static str) -> DirectoryResult<i64> {
        match self {
            NumericInput::Number(value) => Ok(*value),
            NumericInput::Text(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| DirectoryError::validation(field, "must be an integer")),
        }
    }
}

/// Raw create/update payload as received over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub role: String,
    #[schema(value_type = String)]
    pub salary: NumericInput,
    pub join_date: String,
    #[schema(value_type = String)]
    pub years_of_experience: NumericInput,
}

/// Validated employee data, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub role: String,
    pub salary: i64,
    pub join_date: NaiveDate,
    pub years_of_experience: i32,
}

impl EmployeePayload {
    /// Normalize the wire payload into strict values, rejecting malformed
    /// numbers and dates with field-specific errors.
    pub fn normalize(self) -> DirectoryResult<EmployeeInput> {
        let salary = self.salary.normalize("salary")?;
        if salary < 0 {
            return Err(DirectoryError::validation("salary", "must not be negative"));
        }

        let years_of_experience = self.years_of_experience.normalize("years_of_experience")?;
        if years_of_experience < 0 {
            return Err(DirectoryError::validation(
                "years_of_experience",
                "must not be negative",
            ));
        }
        let years_of_experience = i32::try_from(years_of_experience).map_err(|_| {
            DirectoryError::validation("years_of_experience", "is out of range")
        })?;

        let join_date = parse_strict_date(&self.join_date, "join_date")?;

        Ok(EmployeeInput {
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            location: self.location,
            email: self.email,
            phone: self.phone,
            department: self.department,
            role: self.role,
            salary,
            join_date,
            years_of_experience,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EmployeePayload {
        EmployeePayload {
            first_name: "Ann".to_string(),
            last_name: "Smith".to_string(),
            gender: "female".to_string(),
            location: "Berlin".to_string(),
            email: "ann.smith@example.com".to_string(),
            phone: "+49-151-0000001".to_string(),
            department: "Engineering".to_string(),
            role: "Engineer".to_string(),
            salary: NumericInput::Number(72_000),
            join_date: "2022-04-01".to_string(),
            years_of_experience: NumericInput::Text("6".to_string()),
        }
    }

    #[test]
    fn numeric_input_accepts_numbers_and_numeric_strings() {
        let from_json: EmployeePayload = serde_json::from_value(serde_json::json!({
            "first_name": "Ann", "last_name": "Smith", "gender": "female",
            "location": "Berlin", "email": "ann@example.com", "phone": "123",
            "department": "Engineering", "role": "Engineer",
            "salary": 72000, "join_date": "2022-04-01",
            "years_of_experience": "6"
        }))
        .unwrap();

        assert_eq!(from_json.salary.normalize("salary").unwrap(), 72_000);
        assert_eq!(
            from_json
                .years_of_experience
                .normalize("years_of_experience")
                .unwrap(),
            6
        );
    }

    #[test]
    fn numeric_input_rejects_non_numeric_strings() {
        let input = NumericInput::Text("plenty".to_string());

        assert_eq!(
            input.normalize("salary").unwrap_err(),
            DirectoryError::validation("salary", "must be an integer")
        );
    }

    #[test]
    fn normalize_produces_strict_values() {
        let input = payload().normalize().unwrap();

        assert_eq!(input.salary, 72_000);
        assert_eq!(input.years_of_experience, 6);
        assert_eq!(input.join_date, NaiveDate::from_ymd_opt(2022, 4, 1).unwrap());
    }

    #[test]
    fn normalize_rejects_negative_salary() {
        let mut raw = payload();
        raw.salary = NumericInput::Number(-1);

        assert_eq!(
            raw.normalize().unwrap_err(),
            DirectoryError::validation("salary", "must not be negative")
        );
    }

    #[test]
    fn normalize_rejects_malformed_join_date() {
        let mut raw = payload();
        raw.join_date = "01/04/2022".to_string();

        assert_eq!(
            raw.normalize().unwrap_err(),
            DirectoryError::validation("join_date", "expected format YYYY-MM-DD")
        );
    }

    #[test]
    fn json_floats_are_rejected() {
        let result = serde_json::from_value::<NumericInput>(serde_json::json!(72000.5));

        assert!(result.is_err());
    }
}
