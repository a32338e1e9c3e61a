pub mod academics;
pub mod announcement;
pub mod calendar;
pub mod links;
pub mod people;
pub mod school;
pub mod stats;
pub mod upload;
pub mod user;

pub use academics::{Class, Lecture, Lesson, NewClassRequest, NewSubjectRequest, NewTimetableSlotRequest, Subject, TimetableSlot};
pub use announcement::{Announcement, NewAnnouncementRequest, TARGET_AUDIENCES};
pub use calendar::{Event, Holiday, NewEventRequest, NewHolidayRequest, UpdateEventRequest, UpdateHolidayRequest};
pub use links::{LinkedPerson, NewLinkRequest, ParentWithStudents, StudentParentLink, StudentWithParents};
pub use people::{
    NewParentRequest, NewStudentRequest, NewTeacherRequest, Parent, Student, Teacher,
    UpdateParentRequest, UpdateStudentRequest, UpdateTeacherRequest,
};
pub use school::{InviteAdminRequest, NewSchoolRequest, School, SchoolAdmin, UpdateAdminRequest, UpdateSchoolRequest};
pub use stats::{ParentCount, ParentStudentStats, PlatformStats, SchoolStats, StudentCount, TeacherStats};
pub use upload::ExcelUploadResponse;
pub use user::{Acknowledgement, LoginRequest, Role, SetPasswordRequest, SuperAdminSetupResponse, Token, TokenClaims, User};
