//! Launch records dashboard: a launch site success pie and a payload vs.
//! outcome scatter, both recomputed whenever the site dropdown or the
//! payload range changes.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
