pub mod event;
pub mod level;
pub mod levels;
pub mod step;
pub mod story;
pub mod world;
