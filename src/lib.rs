pub mod collections;
pub mod decorators;
pub mod runtime;
pub mod scheduler;
