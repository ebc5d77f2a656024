#![allow(dead_code)]

pub mod scripted_terminal;
pub mod search_server;
