/// Module containing the particle swarm optimizer and its swarm types.
pub mod particles;
