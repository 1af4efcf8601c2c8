use crate::domain::credentials::CredentialPool;
use crate::domain::model::{LookupMatch, NameEntry};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// 對外部人員資料 API 做一次查詢。
///
/// 實作可以在 key 額度用盡時修改 `pool`（移除 key 後換下一把重試）。
#[async_trait]
pub trait PersonLookup: Send + Sync {
    async fn lookup(
        &self,
        pool: &mut CredentialPool,
        name: &NameEntry,
        organization: &str,
    ) -> Result<LookupMatch>;
}
