//! Request and response bodies

pub mod paging;
