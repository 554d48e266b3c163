pub mod core;
pub mod main;
pub mod policy;
pub mod render;
pub mod reply;
pub mod run;
pub mod run_effect;

#[cfg(test)]
mod tests;
