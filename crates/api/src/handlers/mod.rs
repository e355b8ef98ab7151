//! HTTP request handlers, one module per resource.

pub mod content;
pub mod magazine;
pub mod notification;
pub mod review;
