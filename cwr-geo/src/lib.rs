pub mod county;
pub mod projection;
pub mod reservoir;
