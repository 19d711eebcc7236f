//! Controller tests against a scripted body and against the reference world

mod support;
mod scenarios;
