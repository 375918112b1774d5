//! Application layer orchestrating the artwork pipeline.

/// Application services.
pub mod services;

pub use services::{
    ArtworkFetchedEvent, ArtworkFetcher, CallbackListener, FetchListener, FetchSettings,
    FetchTicket, listener,
};
