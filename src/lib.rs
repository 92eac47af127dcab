//! Fitness Calculator (fitcalc) Library
//!
//! Exercise calorie estimation and food photo analysis.

pub mod analysis;
pub mod build_info;
pub mod calories;
pub mod config;
pub mod mcp;
pub mod models;
pub mod tools;
