pub mod converters;
pub mod errors;
pub mod filters;
