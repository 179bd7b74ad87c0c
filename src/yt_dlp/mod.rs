mod client;
mod fetch;
mod model;

pub use client::YtDlpClient;
pub use fetch::{fetch_all, FailurePolicy, FetchOptions, DEFAULT_CONCURRENCY};
pub use model::MetadataRecord;

#[cfg(test)]
pub use {
    client::MetadataClient,
    model::{FormatInfo, VideoInfo},
};
