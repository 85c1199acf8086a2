pub mod magnitude;
pub mod normalizer;
pub mod temporal;
