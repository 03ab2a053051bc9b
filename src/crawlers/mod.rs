pub mod crawler;
pub mod web;
