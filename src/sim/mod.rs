pub mod level;
pub mod profile;
pub mod round;
pub mod session;
