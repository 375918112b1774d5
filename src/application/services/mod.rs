pub mod artwork_fetcher;

pub use artwork_fetcher::{
    ArtworkFetchedEvent, ArtworkFetcher, CallbackListener, FetchListener, FetchSettings,
    FetchTicket, listener,
};
