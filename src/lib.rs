pub mod app;
pub mod config;
pub mod fade;
pub mod render;
pub mod report;
pub mod scene;
pub mod window;

#[cfg(test)]
mod testing;
