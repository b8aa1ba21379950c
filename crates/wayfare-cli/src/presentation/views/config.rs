use std::fmt;

use crate::presentation::view_models::{ConfigViewModel, CreateView};
use crate::presentation::views::Style;

impl CreateView for ConfigViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(ConfigView { data: self, style })
    }
}

struct ConfigView<'a> {
    data: &'a ConfigViewModel,
    style: Style,
}

impl fmt::Display for ConfigView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data;
        writeln!(f, "{}", self.style.dim(&format!("# {}", data.path)))?;
        if let Some(path) = &data.catalog_path {
            writeln!(f, "catalog_path = {:?}", path)?;
        }
        writeln!(f, "poll_interval_ms = {}", data.poll_interval_ms)?;
        writeln!(f, "sponsored_links = {:?}", data.sponsored_links)?;
        if let Some(url) = &data.public_base_url {
            writeln!(f, "blobs.public_base_url = {:?}", url)?;
        }
        Ok(())
    }
}
