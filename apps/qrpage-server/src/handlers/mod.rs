//! Request handlers

pub mod paging;
