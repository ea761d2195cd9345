pub mod archive;
pub mod compute;
pub mod consumer;
pub mod controller;
pub mod notify;
pub mod restore;
pub mod thaw;

pub use controller::WorkerController;
