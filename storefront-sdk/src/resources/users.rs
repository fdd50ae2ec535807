//! Users resource client

use crate::client::HttpClient;
use crate::envelope::ResultEnvelope;
use crate::error::SdkResult;
use crate::pagination::{PageRequest, PaginatedList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Client for user operations
#[derive(Debug, Clone)]
pub struct UsersClient {
    client: Arc<HttpClient>,
}

impl UsersClient {
    /// Create a new users client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List one page of users
    pub async fn list(&self, page: PageRequest) -> SdkResult<ResultEnvelope<PaginatedList<User>>> {
        self.client.get_page("/users", page).await
    }

    /// Get a user by ID
    pub async fn get(&self, id: u64) -> SdkResult<ResultEnvelope<User>> {
        self.client.get(&format!("/users/{}", id)).await
    }

    /// Create a user
    pub async fn create(&self, user: &NewUser) -> SdkResult<ResultEnvelope<User>> {
        self.client.post("/users", user).await
    }

    /// Update a user with the fields set in `update`. Also used for profile edits.
    pub async fn update(&self, id: u64, update: &UserUpdate) -> SdkResult<ResultEnvelope<User>> {
        self.client.put(&format!("/users/{}", id), update).await
    }

    /// Delete a user
    pub async fn delete(&self, id: u64) -> SdkResult<ResultEnvelope<()>> {
        self.client.delete(&format!("/users/{}", id)).await
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub maiden_name: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub eye_color: Option<String>,
    #[serde(default)]
    pub hair: Option<Hair>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    /// First and last name joined
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Apply the set fields of a partial update in place
    pub fn apply(&mut self, update: &UserUpdate) {
        merge(&mut self.first_name, &update.first_name);
        merge(&mut self.last_name, &update.last_name);
        merge(&mut self.email, &update.email);
        merge_opt(&mut self.maiden_name, &update.maiden_name);
        merge_opt(&mut self.phone, &update.phone);
        merge_opt(&mut self.gender, &update.gender);
        merge_opt(&mut self.birth_date, &update.birth_date);
        merge_opt(&mut self.height, &update.height);
        merge_opt(&mut self.weight, &update.weight);
        merge_opt(&mut self.blood_group, &update.blood_group);
        merge_opt(&mut self.eye_color, &update.eye_color);
        merge_opt(&mut self.hair, &update.hair);
        merge_opt(&mut self.university, &update.university);
        merge_opt(&mut self.address, &update.address);
        merge_opt(&mut self.company, &update.company);
    }
}

fn merge<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *field = v.clone();
    }
}

fn merge_opt<T: Clone>(field: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        field.clone_from(value);
    }
}

/// Hair description
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hair {
    #[serde(default)]
    pub color: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Employer details
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
}

/// Request to create a user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl NewUser {
    /// Create a new user request
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            email: email.into(),
            password: None,
            role: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Partial user update; only set fields are sent
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maiden_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair: Option<Hair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the update would send nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_user() -> User {
        serde_json::from_value(json!({
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "maidenName": "Smith",
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "phone": "+81 965-431-3024",
            "hair": {"color": "Brown", "type": "Curly"},
            "address": {
                "address": "626 Main Street",
                "city": "Phoenix",
                "state": "Mississippi",
                "postalCode": "29112",
                "country": "United States"
            },
            "company": {"name": "Dooley", "title": "Sales Manager", "department": "Engineering"},
            "role": "admin"
        }))
        .unwrap()
    }

    #[test]
    fn test_user_deserializes() {
        let user = sample_user();

        assert_eq!(user.full_name(), "Emily Johnson");
        assert_eq!(user.hair.as_ref().unwrap().kind, "Curly");
        assert_eq!(user.address.as_ref().unwrap().postal_code, "29112");
        assert_eq!(user.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_apply_merges_only_set_fields() {
        let mut user = sample_user();
        let update = UserUpdate::new()
            .with_email("emily@example.com")
            .with_company(Company {
                name: "Acme".to_string(),
                title: "CTO".to_string(),
                department: "Engineering".to_string(),
            });

        user.apply(&update);

        assert_eq!(user.email, "emily@example.com");
        assert_eq!(user.first_name, "Emily");
        assert_eq!(user.phone.as_deref(), Some("+81 965-431-3024"));
        assert_eq!(user.company.as_ref().unwrap().name, "Acme");
    }

    #[test]
    fn test_user_update_serializes_only_set_fields() {
        let update = UserUpdate::new().with_first_name("Em").with_phone("555");

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"firstName": "Em", "phone": "555"})
        );
        assert!(UserUpdate::new().is_empty());
    }

    #[test]
    fn test_new_user_request() {
        let request = NewUser::new("Ada", "Lovelace", "ada", "ada@example.com").with_role("moderator");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "username": "ada",
                "email": "ada@example.com",
                "role": "moderator"
            })
        );
    }
}
