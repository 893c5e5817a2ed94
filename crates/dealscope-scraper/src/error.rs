use dealscope_core::Source;
use thiserror::Error;

use crate::driver::DriverError;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The browser session could not be acquired. Fatal to the whole run:
    /// no partial results are claimed.
    #[error("browser session could not be acquired: {0}")]
    Session(#[source] DriverError),

    /// One site's adapter failed (navigation error, driver crash). The
    /// orchestrator records this and continues with the remaining sites.
    #[error("{site} adapter failed: {error}")]
    Adapter {
        site: Source,
        #[source]
        error: DriverError,
    },

    /// A run was requested while another run is still in flight.
    #[error("a run is already in progress")]
    AlreadyRunning,

    /// A run was requested with an empty search query.
    #[error("search query is required")]
    EmptyQuery,
}
