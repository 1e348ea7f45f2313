pub mod cors;

pub use cors::build_cors;
