#![allow(dead_code)]

pub mod location;
pub mod simulator;
