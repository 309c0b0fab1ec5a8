pub mod config;
pub mod frames;
pub mod markup;
pub mod run;
