mod dispatch;
mod handle;
mod registry;
mod store;

pub(crate) use dispatch::dispatch;
pub(crate) use handle::{ErasedListener, Handle};
pub(crate) use registry::{FlightId, Registry};
pub(crate) use store::Store;
