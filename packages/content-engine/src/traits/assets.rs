//! Binary asset upload.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorResult;

/// Location of an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
    pub name: String,
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload `bytes` as `file_name` into `folder` and return where it landed.
    async fn upload_asset(
        &self,
        bytes: &[u8],
        file_name: &str,
        folder: &str,
    ) -> CollaboratorResult<UploadedAsset>;
}
