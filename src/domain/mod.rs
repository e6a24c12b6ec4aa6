pub mod cell;
pub mod coord;
pub mod grid;
pub mod moves;
pub mod outcome;
pub mod pursuit;
