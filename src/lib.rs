pub mod console;
pub mod dataset;
pub mod filters;
pub mod output;
pub mod session;
pub mod stats;
pub mod view;

#[cfg(test)]
mod test_support;
