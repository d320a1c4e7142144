pub use super::ai_analytics::Entity as AiAnalytics;
pub use super::ai_chat_message::Entity as AiChatMessage;
pub use super::ai_chat_session::Entity as AiChatSession;
pub use super::course::Entity as Course;
pub use super::course_review::Entity as CourseReview;
pub use super::course_section::Entity as CourseSection;
pub use super::enrollment::Entity as Enrollment;
pub use super::lesson::Entity as Lesson;
pub use super::resource::Entity as Resource;
pub use super::resource_download::Entity as ResourceDownload;
pub use super::user::Entity as User;
pub use super::user_achievement::Entity as UserAchievement;
