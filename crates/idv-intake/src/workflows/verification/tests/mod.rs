mod common;
mod payload;
