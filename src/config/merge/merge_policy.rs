//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// The layout defaults mirror the directory conventions of the map application.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("layout.datasources_dir", "datasources")?
        .set_default("layout.groups_dir", "datasources/00_National_Data_Sets")?
        .set_default("layout.group_output", "datasources/00_National_Data_Sets.json")?
        .set_default("layout.catalog_output", "wwwroot/init/nm.json")?
        .set_default("layout.build_dir", "wwwroot/build")?
        .set_default("layout.framework_assets_source", "node_modules/terriajs/wwwroot")?
        .set_default("layout.framework_assets_dest", "wwwroot/build/TerriaJS")?
        .set_default("layout.version_module", "version.js")?
        .set_default("watch.debounce_ms", 100)
}
