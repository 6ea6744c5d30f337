pub mod auth;
pub mod categories;
pub mod chapters;
pub mod course_modules;
pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod study;
pub mod users;
