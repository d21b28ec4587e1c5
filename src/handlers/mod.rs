pub mod destinations;
pub mod quote;
pub mod tariff;
