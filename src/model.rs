//! State and update logic, free of any terminal I/O

pub mod animation;
pub mod drawer;
pub mod home;
pub mod position;
pub mod spring;
