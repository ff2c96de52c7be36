//! Scoreboard API - backend for a score tracker
//!
//! This crate provides the REST API for:
//! - Registering players
//! - Recording match results between two players
//! - Aggregate statistics (leaderboard, most active player, biggest win, ...)

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod stats;
