pub mod alchemy;
pub mod coingecko;
