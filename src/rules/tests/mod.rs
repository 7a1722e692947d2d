mod catalog;
mod common;
mod engine;
