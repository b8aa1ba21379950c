use wayfare_catalog::Catalog;

use crate::presentation::view_models::{
    CommandResultViewModel, CountryEntryViewModel, CountryListViewModel, Guidance,
};

pub const LIST_TITLE: &str = "World Travel Explorer";

pub fn present_country_list(catalog: &Catalog) -> CommandResultViewModel<CountryListViewModel> {
    let countries = catalog
        .entries()
        .map(|(id, country)| CountryEntryViewModel {
            id: id.to_string(),
            name: country.name.clone(),
            capital: country.capital.clone(),
        })
        .collect();

    let mut result = CommandResultViewModel::new(CountryListViewModel {
        title: LIST_TITLE.to_string(),
        countries,
    });

    if let Some((first, _)) = catalog.entries().next() {
        result = result.with_suggestion(
            Guidance::new("Open a country page").with_command(format!("wayfare show {}", first)),
        );
    }
    result
}
