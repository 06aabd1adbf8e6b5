pub mod entity;
pub mod geom;
pub mod maze;
pub mod roster;
