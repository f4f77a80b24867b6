//! tripdesk - corporate travel-request approval backend
//!
//! Users submit travel requests; admins approve or cancel them; status
//! changes notify the owner by email and over a realtime channel.

pub mod auth;
pub mod http_server;
pub mod notify;
pub mod travel;
