pub mod enricher;
pub mod poster_cache;
pub mod providers;
pub mod recommendations;

pub use enricher::PosterEnricher;
pub use poster_cache::PosterCache;
pub use recommendations::Recommender;
