//! Customer record and input DTO.

use serde::{Deserialize, Serialize};

use super::Resource;

/// A moving customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// DTO for creating or updating a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Resource for Customer {
    type Input = CustomerInput;

    const PATH: &'static str = "customers";
    const LABEL: &'static str = "Customer";

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn with_id(id: i64, input: CustomerInput) -> Self {
        Self {
            id,
            name: input.name,
            phone: input.phone,
            email: input.email,
            address: input.address,
        }
    }

    fn to_input(&self) -> CustomerInput {
        CustomerInput {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{"id":3,"name":"Ada","phone":"555-0100","email":null,"created_at":"2025-07-01"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();

        assert_eq!(customer.id, 3);
        assert_eq!(customer.phone.as_deref(), Some("555-0100"));
        assert_eq!(customer.email, None);
        assert_eq!(customer.address, None);
    }

    #[test]
    fn test_input_round_trip() {
        let input = CustomerInput {
            name: "Ada".to_string(),
            phone: None,
            email: Some("ada@example.com".to_string()),
            address: Some("1 Main St".to_string()),
        };
        let customer = Customer::with_id(7, input.clone());

        assert_eq!(customer.id(), 7);
        assert_eq!(customer.to_input(), input);
    }
}
