//! Library side of the `karte` CLI: logging setup and the conversion
//! pipeline, exposed for integration tests.

pub mod logging;
pub mod pipeline;
