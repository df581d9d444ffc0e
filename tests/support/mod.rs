#![allow(dead_code)]

pub mod league;
