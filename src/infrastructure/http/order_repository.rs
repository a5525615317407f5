//! REST implementation of the order repository.

use async_trait::async_trait;

use super::client::ApiClient;
use crate::api::dto::{ApiResponse, MockOrderRequest};
use crate::domain::entities::MockOrder;
use crate::domain::repositories::OrderRepository;
use crate::error::ApiError;

/// Order repository backed by `POST orders/mock`.
#[derive(Debug, Clone)]
pub struct HttpOrderRepository {
    client: ApiClient,
}

impl HttpOrderRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderRepository for HttpOrderRepository {
    async fn mock_order(&self, request: &MockOrderRequest) -> Result<MockOrder, ApiError> {
        let response: ApiResponse<MockOrder> =
            self.client.post(&["orders", "mock"], request).await?;
        Ok(response.data)
    }
}
