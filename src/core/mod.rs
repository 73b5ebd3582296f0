//! Configuration and wire models shared by the translator and serializer

pub mod config;
pub mod events;
