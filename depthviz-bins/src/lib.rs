//! Shared setup for the depthviz command line tools

pub mod common;
