pub mod annotations;
pub mod session;
pub mod tracks;
