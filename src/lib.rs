pub mod config;
pub mod device;
pub mod extract;
pub mod geolocate;
pub mod poll;
pub mod workflow;
