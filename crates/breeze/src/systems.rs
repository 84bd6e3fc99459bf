mod system;
mod weather;

pub use system::System;
pub use weather::{WeatherSystem, CITY_NOT_FOUND, GET_WEATHER};
