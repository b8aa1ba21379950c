pub mod config;
pub mod country;
pub mod detail;
pub mod intent;

pub use config::present_config;
pub use country::present_country_list;
pub use detail::present_detail;
pub use intent::present_intent;
