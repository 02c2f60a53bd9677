mod common;
mod engagement;
mod screening;
mod service;
