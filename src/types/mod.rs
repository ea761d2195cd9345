pub mod job;
pub mod job_updates;
pub mod message;
pub mod params;
pub mod queue;
