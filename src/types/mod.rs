pub mod forecast;
pub mod geo;
pub mod observation;
pub mod temperature_category;
pub mod weather_condition;
