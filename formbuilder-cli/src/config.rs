//! Where the forms and answers live on disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "FORMBUILDER_DATA";

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "formbuilder")
}

/// Resolve the data directory.
///
/// `explicit` is the `--data-dir` flag, which clap already falls back to
/// [`DATA_DIR_ENV`] for. Without either the platform data directory is used,
/// then `./.data`.
pub fn data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        dir.to_path_buf()
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let dir = data_dir(Some(Path::new("/tmp/forms")));
        assert_eq!(dir, PathBuf::from("/tmp/forms"));
    }

    #[test]
    fn falls_back_to_a_formbuilder_dir() {
        let dir = data_dir(None);
        let name = dir.to_string_lossy().to_lowercase();
        assert!(name.contains("formbuilder") || name.ends_with(".data"));
    }
}
