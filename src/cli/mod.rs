pub mod check;
pub mod list;
pub mod new;
pub mod parse;
pub mod serve;
