pub mod auth;
pub mod group;
pub mod profile;
pub mod review;
pub mod swagger_main;
pub mod task;

#[cfg(test)]
pub mod test_util;
