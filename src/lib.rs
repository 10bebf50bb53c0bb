pub mod config;
pub mod export;
pub mod load;
pub mod model;
pub mod query;
pub mod report;
pub mod store;

pub use config::LoaderConfig;
pub use load::{load, load_file, LoadError, Loaded};
pub use model::{Dataset, Record};
pub use store::DatasetStore;
