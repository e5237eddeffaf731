//! Gramin Sahayak - Guided loan and fraud intake for rural banking
//!
//! A per-user conversational state machine collects loan, fraud-report and
//! onboarding answers one question at a time, validates each answer, and on
//! completion feeds a decision pipeline that calls a binary eligibility
//! classifier and derives EMI, interest tier and recommended amount.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
