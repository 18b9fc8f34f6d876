pub mod location;
pub mod timestamp;
pub mod vector;
