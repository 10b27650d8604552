use super::SessionGateway;
use crate::errors::GatewayResult;
use crate::model::{ApiResponse, ListContent, User, UserRegisterModel};
use crate::session::Session;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPasswordRequest<'a> {
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResetRequest<'a> {
    new_password: &'a str,
    password: &'a str,
}

impl SessionGateway {
    /// `GET auth/users?page=&size=&businessId=`
    pub async fn list_users(
        &self,
        business_id: &str,
        page: u32,
        size: u32,
    ) -> GatewayResult<ApiResponse<ListContent<User>>> {
        let (request, url) = self.authorized(Method::GET, "auth/users").await?;
        let (page, size) = (page.to_string(), size.to_string());
        let query = [
            ("page", page.as_str()),
            ("size", size.as_str()),
            ("businessId", business_id),
        ];
        self.execute(request.query(&query), &url).await
    }

    /// `POST auth/users/accounts/register`
    pub async fn create_user(&self, user: &UserRegisterModel) -> GatewayResult<ApiResponse<User>> {
        let (request, url) = self
            .authorized(Method::POST, "auth/users/accounts/register")
            .await?;
        log::info!("Registering user '{}'", user.username);
        self.execute(request.json(user), &url).await
    }

    /// Sets another user's password: `PUT auth/credentials/{userId}`.
    pub async fn update_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> GatewayResult<ApiResponse<Session>> {
        let path = format!("auth/credentials/{}", urlencoding::encode(user_id));
        let (request, url) = self.authorized(Method::PUT, &path).await?;
        self.execute(request.json(&NewPasswordRequest { new_password }), &url)
            .await
    }

    /// Changes the logged-in user's own password: `PUT auth/credentials/reset`.
    pub async fn change_current_user_password(
        &self,
        password: &str,
        new_password: &str,
    ) -> GatewayResult<ApiResponse<Session>> {
        let (request, url) = self.authorized(Method::PUT, "auth/credentials/reset").await?;
        let body = PasswordResetRequest {
            new_password,
            password,
        };
        self.execute(request.json(&body), &url).await
    }
}
