pub mod classify;
pub mod plot;
pub mod session;
