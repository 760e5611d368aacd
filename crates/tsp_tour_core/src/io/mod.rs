pub mod input;
pub mod options;
pub mod random;
