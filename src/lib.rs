//! Interview Agent - Research interview state and prompt engine
//!
//! This crate tracks a research-objective driven interview (questions,
//! follow-ups, extracted insights, progress) and renders that state into the
//! tag-delimited payloads an interviewer LLM consumes on each turn.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
