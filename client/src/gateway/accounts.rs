use super::SessionGateway;
use crate::errors::{GatewayError, GatewayResult};
use crate::model::{ApiResponse, BusinessAccount, BusinessAccountStatus, ListContent};
use reqwest::Method;

/// First page index used when the caller has no preference.
pub const DEFAULT_PAGE: u32 = 0;
/// Page size used when the caller has no preference.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

impl SessionGateway {
    /// `GET business/accounts?page=&size=`
    pub async fn list_business_accounts(
        &self,
        page: u32,
        size: u32,
    ) -> GatewayResult<ApiResponse<ListContent<BusinessAccount>>> {
        let (request, url) = self.authorized(Method::GET, "business/accounts").await?;
        self.execute(request.query(&[("page", page), ("size", size)]), &url)
            .await
    }

    /// `GET business/accounts/{id}`
    pub async fn business_account(&self, id: &str) -> GatewayResult<ApiResponse<BusinessAccount>> {
        let path = format!("business/accounts/{}", urlencoding::encode(id));
        let (request, url) = self.authorized(Method::GET, &path).await?;
        self.execute(request, &url).await
    }

    /// `PUT business/accounts/{id}/status/{STATUS}`
    pub async fn update_business_account_status(
        &self,
        account: &BusinessAccount,
        status: BusinessAccountStatus,
    ) -> GatewayResult<ApiResponse<BusinessAccount>> {
        let id = account.existing_id().ok_or_else(|| {
            GatewayError::InvalidRequest("cannot change status of an unsaved account".to_string())
        })?;

        let path = format!(
            "business/accounts/{}/status/{}",
            urlencoding::encode(id),
            status.as_str()
        );
        let (request, url) = self.authorized(Method::PUT, &path).await?;
        log::info!("Setting business account {id} to {status}");
        self.execute(request, &url).await
    }

    /// Creates the account when it has no id, updates it otherwise.
    ///
    /// Create is `POST business/accounts`, update is
    /// `PUT business/accounts/{id}`; the account is the request body in both.
    pub async fn save_business_account(
        &self,
        account: &BusinessAccount,
    ) -> GatewayResult<ApiResponse<BusinessAccount>> {
        let (request, url) = match account.existing_id() {
            None => self.authorized(Method::POST, "business/accounts").await?,
            Some(id) => {
                let path = format!("business/accounts/{}", urlencoding::encode(id));
                self.authorized(Method::PUT, &path).await?
            }
        };
        self.execute(request.json(account), &url).await
    }
}
