pub mod alpha;
pub mod hsl;
pub mod mode;
pub mod separable;
