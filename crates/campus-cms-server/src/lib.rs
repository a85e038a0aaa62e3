//! Campus CMS server: page composition, the JSON API and CLI commands.

pub mod cli;
pub mod pages;
pub mod rest;
