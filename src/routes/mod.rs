pub mod attendance;

pub mod courses;

pub mod grades;

pub mod students;

pub mod teachers;

pub use attendance::configure_attendance_routes;
pub use courses::configure_courses_routes;
pub use grades::configure_grades_routes;
pub use students::configure_students_routes;
pub use teachers::configure_teachers_routes;
