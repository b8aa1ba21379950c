use std::fmt;

use crate::presentation::view_models::{CountryListViewModel, CreateView};
use crate::presentation::views::Style;

impl CreateView for CountryListViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(CountryListView { data: self, style })
    }
}

struct CountryListView<'a> {
    data: &'a CountryListViewModel,
    style: Style,
}

impl fmt::Display for CountryListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.style.heading(&self.data.title))?;
        writeln!(f)?;

        if self.data.countries.is_empty() {
            writeln!(f, "No countries in the catalog.")?;
            return Ok(());
        }

        let width = self
            .data
            .countries
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);

        for country in &self.data.countries {
            writeln!(
                f,
                "  {:<width$}  {}",
                country.name,
                self.style.dim(&format!("({})", country.id)),
                width = width
            )?;
        }
        Ok(())
    }
}
