use crate::common::*;

#[async_trait]
pub trait FileRepository: Send + Sync {
    #[doc = "Directory every file name is resolved against"]
    fn root_dir(&self) -> &Path;
    #[doc = "Full path of `file_name`, or `None` when the name would leave the directory"]
    fn resolve(&self, file_name: &str) -> Option<PathBuf>;
    async fn ensure_root_dir(&self) -> Result<(), anyhow::Error>;
    async fn exists(&self, file_name: &str) -> bool;
    async fn read_file(&self, file_name: &str) -> Result<Option<Vec<u8>>, anyhow::Error>;
    async fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, anyhow::Error>;
}
