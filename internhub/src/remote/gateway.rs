//! Remote auth gateway
//!
//! Login, registration and the server-owned subset of user operations.
//! The bearer token returned by the auth endpoints is kept in the store
//! under the `token` key and attached to every later request.

use super::{build_client, send, send_json};
use crate::config::TOKEN_KEY;
use crate::database::{Role, Store, UpdateUserRequest, User};
use crate::error::{AppError, Result};
use crate::ids::UserId;
use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Fields a user may change on their own profile.
///
/// Anything outside this set (role, email, approval) is never sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl From<&UpdateUserRequest> for ProfileUpdate {
    fn from(patch: &UpdateUserRequest) -> Self {
        Self {
            name: patch.name.clone(),
            phone: patch.phone.clone(),
            cgpa: patch.cgpa,
            branch: patch.branch.clone(),
            skills: patch.skills.clone(),
            resume_url: patch.resume_url.clone(),
            company_name: patch.company_name.clone(),
            website: patch.website.clone(),
            description: patch.description.clone(),
            linkedin: patch.linkedin.clone(),
            github: patch.github.clone(),
        }
    }
}

/// Convert a raw server user record into a `User`, mapping `_id` to `id`
pub(crate) fn user_from_record(record: Value) -> Result<User> {
    let mut fields = match record {
        Value::Object(fields) => fields,
        other => {
            return Err(AppError::InvalidInput(format!(
                "expected a user object, got {}",
                other
            )))
        }
    };

    if let Some(raw_id) = fields.remove("_id") {
        fields.entry("id").or_insert(raw_id);
    }
    fields.remove("__v");

    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// Split an auth response into the user and its (optional) token
fn session_from_record(record: Value) -> Result<(User, Option<String>)> {
    let mut fields: Map<String, Value> = match record {
        Value::Object(fields) => fields,
        other => {
            return Err(AppError::InvalidInput(format!(
                "expected an auth response object, got {}",
                other
            )))
        }
    };

    let token = match fields.remove("token") {
        Some(Value::String(token)) if !token.is_empty() => Some(token),
        _ => None,
    };

    // Some backends nest the user under `user`
    let user = match fields.remove("user") {
        Some(nested @ Value::Object(_)) => user_from_record(nested)?,
        _ => user_from_record(Value::Object(fields))?,
    };

    Ok((user, token))
}

#[derive(Clone)]
pub struct AuthGateway {
    client: reqwest::Client,
    base_url: String,
    store: Store,
}

impl AuthGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration, store: Store) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/users/<id>[/<action>]`, with the id encoded as a single path segment
    fn user_url(&self, id: &UserId, action: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::InvalidInput(format!("bad API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidInput(format!("API URL {} has no path", self.base_url)))?
            .pop_if_empty()
            .push("users")
            .push(id.as_str())
            .extend(action);
        Ok(url)
    }

    /// Attach the stored bearer token, if any
    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(match self.current_token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn start_session(&self, request: RequestBuilder) -> Result<User> {
        let record: Value = send_json(request).await?;
        let (user, token) = session_from_record(record)?;

        match token {
            Some(token) => self.store.set_value(TOKEN_KEY, &token).await?,
            None => tracing::debug!("Auth response for {} carried no token", user.id),
        }

        tracing::info!("Signed in as {} ({:?})", user.email, user.role);
        Ok(user)
    }

    // ===== Session =====

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        tracing::info!("Logging in: {}", email);
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        self.start_session(request).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<User> {
        tracing::info!("Registering {:?}: {}", req.role, req.email);
        let request = self.client.post(self.url("/auth/register")).json(req);
        self.start_session(request).await
    }

    /// Sign in with a Google identity credential
    pub async fn google_login(&self, credential: &str) -> Result<User> {
        let request = self
            .client
            .post(self.url("/auth/google"))
            .json(&json!({ "credential": credential }));
        self.start_session(request).await
    }

    pub async fn logout(&self) -> Result<()> {
        tracing::info!("Logging out");
        self.store.remove_value(TOKEN_KEY).await
    }

    pub async fn current_token(&self) -> Result<Option<String>> {
        self.store.get_value(TOKEN_KEY).await
    }

    // ===== Users =====

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let request = self
            .authorized(self.client.put(self.url("/users/profile")).json(update))
            .await?;
        let record: Value = send_json(request).await?;
        user_from_record(record)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.fetch_users("/users").await
    }

    pub async fn list_students(&self) -> Result<Vec<User>> {
        self.fetch_users("/users/students").await
    }

    async fn fetch_users(&self, path: &str) -> Result<Vec<User>> {
        let request = self.authorized(self.client.get(self.url(path))).await?;
        let records: Vec<Value> = send_json(request).await?;
        records.into_iter().map(user_from_record).collect()
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        let request = self
            .authorized(self.client.get(self.user_url(id, None)?))
            .await?;
        let record: Value = send_json(request).await?;
        user_from_record(record)
    }

    pub async fn approve_user(&self, id: &UserId) -> Result<()> {
        tracing::info!("Approving remote user: {}", id);
        let request = self
            .authorized(self.client.put(self.user_url(id, Some("approve"))?))
            .await?;
        send(request).await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        tracing::info!("Deleting remote user: {}", id);
        let request = self
            .authorized(self.client.delete(self.user_url(id, None)?))
            .await?;
        send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_record_maps_underscore_id() {
        let user = user_from_record(json!({
            "_id": "66a1f0",
            "__v": 0,
            "role": "student",
            "name": "Riya",
            "email": "riya@x.edu",
            "cgpa": 8.1
        }))
        .unwrap();

        assert_eq!(user.id, UserId::from("66a1f0"));
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.cgpa, Some(8.1));
        assert!(!user.approved);
    }

    #[test]
    fn test_user_from_record_rejects_non_object() {
        assert!(user_from_record(json!(["nope"])).is_err());
    }

    #[test]
    fn test_session_from_record() {
        let (user, token) = session_from_record(json!({
            "_id": "u1",
            "role": "Company",
            "name": "TechCorp HR",
            "email": "hr@techcorp.com",
            "approved": true,
            "token": "jwt-abc"
        }))
        .unwrap();
        assert_eq!(user.id, UserId::from("u1"));
        assert_eq!(token.as_deref(), Some("jwt-abc"));

        let (nested, none) = session_from_record(json!({
            "user": { "_id": "u2", "role": "Admin", "name": "A", "email": "a@x.edu" }
        }))
        .unwrap();
        assert_eq!(nested.id, UserId::from("u2"));
        assert_eq!(none, None);
    }

    async fn create_test_gateway(base_url: &str) -> AuthGateway {
        let store = Store::open_in_memory().await.unwrap();
        AuthGateway::new(base_url, Duration::from_secs(5), store).unwrap()
    }

    #[tokio::test]
    async fn test_user_url_encodes_id_as_one_segment() {
        let gateway = create_test_gateway("http://localhost:5000/api/").await;

        let url = gateway.user_url(&UserId::from("a/b c"), None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/users/a%2Fb%20c");

        let url = gateway
            .user_url(&UserId::from("../admin"), Some("approve"))
            .unwrap();
        assert_eq!(url.path(), "/api/users/..%2Fadmin/approve");
    }

    #[tokio::test]
    async fn test_user_url_rejects_unusable_base() {
        let gateway = create_test_gateway("not a url").await;

        let err = gateway.user_url(&UserId::from("u1"), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_profile_update_drops_disallowed_fields() {
        let patch = UpdateUserRequest {
            name: Some("New Name".to_string()),
            email: Some("hijack@x.edu".to_string()),
            approved: Some(true),
            github: Some("https://github.com/new".to_string()),
            ..Default::default()
        };

        let body = serde_json::to_value(ProfileUpdate::from(&patch)).unwrap();

        assert_eq!(
            body,
            json!({ "name": "New Name", "github": "https://github.com/new" })
        );
    }
}
