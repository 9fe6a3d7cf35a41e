use crate::common::*;

use crate::traits::repository_traits::file_repository::*;

use crate::utils_modules::file_utils::*;

#[doc = "Files kept flat inside a single local directory"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct FileRepositoryImpl {
    root: PathBuf,
}

#[async_trait]
impl FileRepository for FileRepositoryImpl {
    fn root_dir(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        if is_plain_file_name(file_name) {
            Some(self.root.join(file_name))
        } else {
            None
        }
    }

    async fn ensure_root_dir(&self) -> Result<(), anyhow::Error> {
        tokio::fs::create_dir_all(&self.root).await.with_context(|| {
            format!(
                "[FileRepositoryImpl->ensure_root_dir] Failed to create {:?}",
                self.root
            )
        })
    }

    async fn exists(&self, file_name: &str) -> bool {
        match self.resolve(file_name) {
            Some(path) => tokio::fs::metadata(&path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false),
            None => false,
        }
    }

    #[doc = "Reads a whole file. A missing file is `Ok(None)`, not an error."]
    async fn read_file(&self, file_name: &str) -> Result<Option<Vec<u8>>, anyhow::Error> {
        let path: PathBuf = match self.resolve(file_name) {
            Some(path) => path,
            None => return Ok(None),
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow!(
                "[FileRepositoryImpl->read_file] Failed to read {:?}: {}",
                path,
                e
            )),
        }
    }

    #[doc = r#"
        Writes `contents` under `file_name`, replacing any existing file.

        The bytes land in a hidden `.part` sibling first and are renamed into place, so
        readers never observe a half-written file.
    "#]
    async fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, anyhow::Error> {
        let path: PathBuf = self.resolve(file_name).ok_or_else(|| {
            anyhow!(
                "[FileRepositoryImpl->write_file] Refusing to write outside {:?}: '{}'",
                self.root,
                file_name
            )
        })?;

        self.ensure_root_dir().await?;

        let part_path: PathBuf = self.root.join(format!(".{}.part", file_name));

        tokio::fs::write(&part_path, contents)
            .await
            .with_context(|| format!("[FileRepositoryImpl->write_file] Failed to write {:?}", part_path))?;

        if let Err(e) = tokio::fs::rename(&part_path, &path).await {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(anyhow!(
                "[FileRepositoryImpl->write_file] Failed to move {:?} into place: {}",
                path,
                e
            ));
        }

        Ok(path)
    }
}
