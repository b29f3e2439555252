pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod logger;
pub mod page_sink;
pub mod pages;
pub mod post;
pub mod post_list;
pub mod routes;
pub mod server;
pub mod site;
pub mod view;
mod test_data;
mod text_utils;
