pub mod scrape;
pub mod serve;

// Re-export command functions for convenience
pub use scrape::scrape;
pub use serve::serve;
