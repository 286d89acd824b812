#![allow(dead_code)]

pub mod page_server;
pub mod scripted_page;
