//! Workspace layout: where fragments live and where build outputs go.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Workspace-relative layout paths as they appear in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Top-level data-source directory; its `*.json` files make up the catalog
    pub datasources_dir: PathBuf,
    /// Directory of group fragments merged into `group_output`
    pub groups_dir: PathBuf,
    /// Group document written by merge-groups
    pub group_output: PathBuf,
    /// Catalog document written by merge-catalog
    pub catalog_output: PathBuf,
    /// Application build directory
    pub build_dir: PathBuf,
    /// Static asset tree shipped by the map framework
    pub framework_assets_source: PathBuf,
    /// Where the framework assets are mirrored for the build
    pub framework_assets_dest: PathBuf,
    /// Generated module carrying the build version string
    pub version_module: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            datasources_dir: PathBuf::from("datasources"),
            groups_dir: PathBuf::from("datasources/00_National_Data_Sets"),
            group_output: PathBuf::from("datasources/00_National_Data_Sets.json"),
            catalog_output: PathBuf::from("wwwroot/init/nm.json"),
            build_dir: PathBuf::from("wwwroot/build"),
            framework_assets_source: PathBuf::from("node_modules/terriajs/wwwroot"),
            framework_assets_dest: PathBuf::from("wwwroot/build/TerriaJS"),
            version_module: PathBuf::from("version.js"),
        }
    }
}

impl LayoutConfig {
    /// Resolve every path against the workspace root. Absolute paths are kept as-is.
    pub fn resolve(&self, workspace_root: &Path) -> Layout {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                workspace_root.join(p)
            }
        };

        Layout {
            workspace_root: workspace_root.to_path_buf(),
            datasources_dir: join(&self.datasources_dir),
            groups_dir: join(&self.groups_dir),
            group_output: join(&self.group_output),
            catalog_output: join(&self.catalog_output),
            build_dir: join(&self.build_dir),
            framework_assets_source: join(&self.framework_assets_source),
            framework_assets_dest: join(&self.framework_assets_dest),
            version_module: join(&self.version_module),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let fields = [
            ("datasources_dir", &self.datasources_dir),
            ("groups_dir", &self.groups_dir),
            ("group_output", &self.group_output),
            ("catalog_output", &self.catalog_output),
            ("build_dir", &self.build_dir),
            ("framework_assets_source", &self.framework_assets_source),
            ("framework_assets_dest", &self.framework_assets_dest),
            ("version_module", &self.version_module),
        ];
        for (name, path) in fields {
            if path.as_os_str().is_empty() {
                return Err(format!("{} cannot be empty", name));
            }
        }
        if self.group_output == self.catalog_output {
            return Err("group_output and catalog_output must differ".to_string());
        }
        Ok(())
    }
}

/// Layout with every path resolved against a workspace root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub workspace_root: PathBuf,
    pub datasources_dir: PathBuf,
    pub groups_dir: PathBuf,
    pub group_output: PathBuf,
    pub catalog_output: PathBuf,
    pub build_dir: PathBuf,
    pub framework_assets_source: PathBuf,
    pub framework_assets_dest: PathBuf,
    pub version_module: PathBuf,
}

impl Layout {
    /// Default layout rooted at `workspace_root`
    pub fn for_workspace(workspace_root: &Path) -> Self {
        LayoutConfig::default().resolve(workspace_root)
    }

    /// Path relative to the workspace root for display, or the path itself when outside it.
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.workspace_root).unwrap_or(path)
    }
}
