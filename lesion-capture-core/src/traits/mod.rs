pub mod clients;
pub mod delegate;
pub mod frame_provider;
