//! Higher-level vector operations

pub mod projection;
