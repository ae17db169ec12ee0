pub mod client;
pub mod crawler;
pub mod scraper;

#[cfg(test)]
pub mod testing;
