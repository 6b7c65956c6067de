//! Domain layer: entities of the account service

pub mod entities;
