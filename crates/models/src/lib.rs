//! SeaORM entities for the clinic schema plus connection helpers.

pub mod db;
pub mod pet_type;
pub mod specialty;
pub mod vet;
pub mod vet_specialty;
pub mod owner;
pub mod pet;
pub mod visit;
pub mod user;
pub mod role;

#[cfg(test)]
mod tests;
