use std::path::Path;

use wayfare_runtime::Config;

use crate::presentation::view_models::{
    CommandResultViewModel, ConfigViewModel, Guidance, StatusBadge,
};

pub fn present_config(
    config: &Config,
    path: &Path,
    from_file: bool,
    written: bool,
) -> CommandResultViewModel<ConfigViewModel> {
    let content = ConfigViewModel {
        path: path.display().to_string(),
        from_file,
        written,
        catalog_path: config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string()),
        poll_interval_ms: config.poll_interval_ms,
        sponsored_links: config.sponsored_links.clone(),
        public_base_url: config.blobs.public_base_url.clone(),
    };

    let mut result = CommandResultViewModel::new(content);
    if written {
        result = result.with_badge(StatusBadge::success("Config written"));
    } else if !from_file {
        result = result
            .with_badge(StatusBadge::info("No config.toml, showing defaults"))
            .with_suggestion(Guidance::new("Create one").with_command("wayfare config init"));
    }
    result
}
