use dreamroster_core::{resolve_asset, AssetSubject, ResolvedAsset};
use std::path::PathBuf;

pub trait AssetResolver {
    fn resolve(&self, subject: AssetSubject<'_>) -> ResolvedAsset;
}

/// Looks candidates up under an image root such as `assets/images`.
#[derive(Debug, Clone)]
pub struct FsAssetResolver {
    root: PathBuf,
}

impl FsAssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for FsAssetResolver {
    fn resolve(&self, subject: AssetSubject<'_>) -> ResolvedAsset {
        resolve_asset(subject, |path| self.root.join(path).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamroster_core::{Card, Region, Role};
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("dreamroster-assets-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn prefers_the_first_file_that_exists() {
        let root = temp_root();
        fs::create_dir_all(root.join("players")).expect("mkdir");
        fs::write(root.join("players/canyon.png"), b"png").expect("write");
        let card = Card {
            id: "canyon-dwg-2020".to_string(),
            name: "Canyon".to_string(),
            team: "DWG".to_string(),
            region: Region::Lck,
            role: Role::Jungle,
            year: "2020".to_string(),
            image_ref: None,
        };
        let resolver = FsAssetResolver::new(&root);
        assert_eq!(
            resolver.resolve(AssetSubject::PlayerPhoto(&card)),
            ResolvedAsset::Found("players/canyon.png".to_string())
        );
        assert_eq!(
            resolver.resolve(AssetSubject::TeamLogo("DWG")),
            ResolvedAsset::Placeholder('D')
        );
        let _ = fs::remove_dir_all(&root);
    }
}
