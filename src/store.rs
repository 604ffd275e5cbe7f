use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read-only byte source for template PDFs, keyed by the registry's asset
/// path.
pub trait TemplateStore: Send + Sync {
    fn load(&self, asset_path: &str) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct FsTemplateStore {
    root: PathBuf,
    digests: HashMap<String, String>,
}

impl FsTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            digests: HashMap::new(),
        }
    }

    /// Pin the expected SHA-256 (lowercase hex) of one asset.
    pub fn with_digest(mut self, asset_path: impl Into<String>, sha256: impl Into<String>) -> Self {
        self.digests
            .insert(asset_path.into(), sha256.into().to_ascii_lowercase());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, asset_path: &str) -> io::Result<PathBuf> {
        let rel = Path::new(asset_path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("asset path escapes template root: {asset_path}"),
            ));
        }
        Ok(self.root.join(rel))
    }
}

impl TemplateStore for FsTemplateStore {
    fn load(&self, asset_path: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(asset_path)?;
        let bytes = std::fs::read(&path)?;
        verify_digest(asset_path, &bytes, self.digests.get(asset_path))?;
        Ok(bytes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    assets: HashMap<String, Vec<u8>>,
    digests: HashMap<String, String>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_path: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(asset_path.into(), bytes);
    }

    pub fn insert_verified(
        &mut self,
        asset_path: impl Into<String>,
        bytes: Vec<u8>,
        sha256: impl Into<String>,
    ) {
        let asset_path = asset_path.into();
        self.digests
            .insert(asset_path.clone(), sha256.into().to_ascii_lowercase());
        self.assets.insert(asset_path, bytes);
    }

    pub fn contains(&self, asset_path: &str) -> bool {
        self.assets.contains_key(asset_path)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn load(&self, asset_path: &str) -> io::Result<Vec<u8>> {
        let bytes = self.assets.get(asset_path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory template for {asset_path}"),
            )
        })?;
        verify_digest(asset_path, &bytes, self.digests.get(asset_path))?;
        Ok(bytes)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        use std::fmt::Write;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn verify_digest(asset_path: &str, bytes: &[u8], expected: Option<&String>) -> io::Result<()> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let actual = sha256_hex(bytes);
    if &actual != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("digest mismatch for {asset_path}: expected {expected}, found {actual}"),
        ));
    }
    Ok(())
}
