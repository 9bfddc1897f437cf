pub mod replay;
pub mod screening;
