//! External delivery channels for notification fan-out.

pub mod email;
