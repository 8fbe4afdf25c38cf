pub mod probe;
pub mod tcp;
pub mod udp;
