pub mod games;
pub mod moves;
