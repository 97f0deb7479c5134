//! API layer - native (in-process) client and REST transport

pub mod native;
pub mod rest;
