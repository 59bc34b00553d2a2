mod client;
mod item;
mod ordering;
mod parser;

pub use client::*;
pub use item::*;
pub use parser::*;
pub use reqwest::Url;
