pub mod breakdown;
pub mod cargo;
pub mod destination;
pub mod surcharge;
pub mod tariff;
