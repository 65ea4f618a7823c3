pub mod config;
pub mod logging;

pub mod destination;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod resolver;
pub mod staging;
pub mod url_model;

pub use downloader::{ClientConfig, DownloadOptions, Downloader};
pub use error::{ErrorKind, FetchError};
pub use fetch::{fetch, fetch_with, FetchRequest};
pub use resolver::{resolve, ResolvedSource};
