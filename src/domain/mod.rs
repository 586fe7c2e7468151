pub mod group;
pub mod profile;
pub mod review;
pub mod task;

#[cfg(test)]
pub mod test_util;

/// An uploaded file passing through the service on its way to blob storage
#[derive(Debug)]
#[cfg_attr(test, derive(Clone, PartialEq, Eq))]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// The file extension used when building a storage path, falling back to
    /// "bin" for extensionless names
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("bin")
    }
}
