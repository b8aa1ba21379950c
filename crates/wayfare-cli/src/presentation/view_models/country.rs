use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CountryListViewModel {
    pub title: String,
    pub countries: Vec<CountryEntryViewModel>,
}

#[derive(Debug, Serialize)]
pub struct CountryEntryViewModel {
    pub id: String,
    pub name: String,
    pub capital: String,
}
