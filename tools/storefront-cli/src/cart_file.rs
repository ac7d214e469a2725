//! Cart service backed by a local JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{
    CartLineKey, CartResult, CartService, CartServiceError, CartSnapshot,
};

/// On-disk cart document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartFile {
    #[serde(flatten)]
    cart: CartSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Each call reads the file afresh and mutations rewrite it whole. A missing
/// file is an empty cart.
#[derive(Debug, Clone)]
pub struct FileCartService {
    path: PathBuf,
}

impl FileCartService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the cart was last written.
    pub async fn updated_at(&self) -> CartResult<Option<DateTime<Utc>>> {
        Ok(self.read().await?.updated_at)
    }

    async fn read(&self) -> CartResult<CartFile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                CartServiceError::Transport(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CartFile::default()),
            Err(e) => Err(CartServiceError::Transport(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write(&self, mut file: CartFile) -> CartResult<()> {
        file.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| CartServiceError::Transport(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CartServiceError::Transport(format!("{}: {}", parent.display(), e)))?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| CartServiceError::Transport(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl CartService for FileCartService {
    async fn snapshot(&self) -> CartResult<CartSnapshot> {
        Ok(self.read().await?.cart)
    }

    async fn add_quantity(&self, key: &CartLineKey, quantity: u32) -> CartResult<()> {
        if quantity == 0 {
            return Err(CartServiceError::Rejected(
                "quantity must be positive".to_string(),
            ));
        }
        let mut file = self.read().await?;
        file.cart.add(key, quantity);
        self.write(file).await
    }

    async fn remove_line(&self, key: &CartLineKey) -> CartResult<()> {
        let mut file = self.read().await?;
        if !file.cart.remove(key) {
            return Err(CartServiceError::LineNotFound(key.to_string()));
        }
        self.write(file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_cart_path() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("storefront-cli-test-{}-{}", std::process::id(), n))
            .join("cart.json")
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_cart() {
        let service = FileCartService::new(temp_cart_path());
        assert!(service.snapshot().await.unwrap().is_empty());
        assert!(service.updated_at().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mutations_persist() {
        let path = temp_cart_path();
        let key = CartLineKey::variant("tee", "tee-a-s");

        let service = FileCartService::new(&path);
        service.add_quantity(&key, 2).await.unwrap();
        service.add_quantity(&key, 1).await.unwrap();

        let reopened = FileCartService::new(&path);
        assert_eq!(reopened.snapshot().await.unwrap().quantity_of(&key), 3);
        assert!(reopened.updated_at().await.unwrap().is_some());

        reopened.remove_line(&key).await.unwrap();
        assert!(service.snapshot().await.unwrap().is_empty());
        assert!(matches!(
            service.remove_line(&key).await,
            Err(CartServiceError::LineNotFound(_))
        ));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn test_corrupt_file_is_transport_error() {
        let path = temp_cart_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "not json").await.unwrap();

        let service = FileCartService::new(&path);
        assert!(matches!(
            service.snapshot().await,
            Err(CartServiceError::Transport(_))
        ));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
