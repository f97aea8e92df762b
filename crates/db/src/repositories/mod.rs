//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod art_style_repo;
pub mod audit_log_repo;
pub mod dashboard_repo;
pub mod image_repo;
pub mod learning_repo;
pub mod project_repo;
pub mod prompt_template_repo;
pub mod session_repo;
pub mod user_repo;
pub mod video_repo;

pub use art_style_repo::ArtStyleRepo;
pub use audit_log_repo::AuditLogRepo;
pub use dashboard_repo::DashboardRepo;
pub use image_repo::ImageRepo;
pub use learning_repo::LearningRepo;
pub use project_repo::ProjectRepo;
pub use prompt_template_repo::PromptTemplateRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
