//! Core application logic: state management, event handling, and action dispatch.

pub mod action;
pub mod commands;
pub mod event;
pub mod handler;
pub mod state;
pub mod timer;
