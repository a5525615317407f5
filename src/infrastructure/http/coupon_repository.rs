//! REST implementation of the coupon repository.

use async_trait::async_trait;
use tracing::debug;

use super::client::ApiClient;
use crate::api::dto::{AckResponse, ApiResponse, CouponRequest, ListQuery, PaginatedResponse};
use crate::domain::entities::{Coupon, Page};
use crate::domain::repositories::CouponRepository;
use crate::error::ApiError;

const COUPONS: &str = "coupons";

/// Coupon repository backed by the `coupons` REST resource.
#[derive(Debug, Clone)]
pub struct HttpCouponRepository {
    client: ApiClient,
}

impl HttpCouponRepository {
    /// Creates a new repository on top of a shared API client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CouponRepository for HttpCouponRepository {
    async fn list(&self, query: &ListQuery) -> Result<Page<Coupon>, ApiError> {
        debug!(
            limit = query.limit,
            offset = query.offset,
            filter = query.coupon_code.as_deref().unwrap_or(""),
            "Listing coupons"
        );

        let response: PaginatedResponse<Coupon> =
            self.client.get_with_query(&[COUPONS], query).await?;

        Ok(Page::new(
            response.data,
            response.paging.total,
            response.paging.limit,
            response.paging.offset,
        ))
    }

    async fn get(&self, code: &str) -> Result<Coupon, ApiError> {
        self.client.get_data(&[COUPONS, code]).await
    }

    async fn create(&self, request: &CouponRequest) -> Result<Coupon, ApiError> {
        let response: ApiResponse<Coupon> = self.client.post(&[COUPONS], request).await?;
        Ok(response.data)
    }

    async fn update(&self, code: &str, request: &CouponRequest) -> Result<Coupon, ApiError> {
        let response: ApiResponse<Coupon> = self.client.put(&[COUPONS, code], request).await?;
        Ok(response.data)
    }

    async fn delete(&self, code: &str) -> Result<(), ApiError> {
        let response: AckResponse = self.client.delete(&[COUPONS, code]).await?;
        debug!(code, message = %response.message, "Coupon deleted");
        Ok(())
    }
}
