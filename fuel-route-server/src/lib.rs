//! Fuel route optimizer server.
//!
//! A web service that answers: "Driving from here to there inside the USA,
//! where should I refuel and what will the fuel cost?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod geocoding;
pub mod planner;
pub mod retry;
pub mod routing;
pub mod telemetry;
pub mod web;
