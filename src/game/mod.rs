// Game-level systems built on the engine

pub mod characters;
