//! Binary assets referenced by scene visuals.
//!
//! The catalog only carries model paths as authored (`/models/shirt.stl`);
//! this module resolves them against an asset root and decodes them.

use std::path::{Path, PathBuf};

pub mod stl;

/// Resolve an authored model path under `root`.  A leading `/` means
/// "relative to the asset root", never the filesystem root.
pub fn resolve_model_path(root: &Path, model: &str) -> PathBuf {
    root.join(model.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_slash_stays_under_root() {
        let p = resolve_model_path(Path::new("/srv/assets"), "/models/shirt.stl");
        assert_eq!(p, PathBuf::from("/srv/assets/models/shirt.stl"));
        let p = resolve_model_path(Path::new("assets"), "models/bin.stl");
        assert_eq!(p, PathBuf::from("assets/models/bin.stl"));
    }
}
