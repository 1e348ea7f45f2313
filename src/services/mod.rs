pub mod attendance;
pub mod courses;
pub mod grades;
pub mod students;
pub mod teachers;

pub use attendance::AttendanceService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use students::StudentService;
pub use teachers::TeacherService;
