//! Table builders, one per generated table, invoked by the engine in
//! dependency order: reference tables first, then trips, then deliveries.

pub mod deliveries;
pub mod drivers;
pub mod routes;
pub mod trips;
pub mod vehicles;
