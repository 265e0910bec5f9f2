pub mod page_repo;
pub mod project_repo;
pub mod rule_repo;
pub mod transition_repo;
pub mod version_repo;

pub use page_repo::PageRepo;
pub use project_repo::ProjectRepo;
pub use rule_repo::ObfuscationRuleRepo;
pub use transition_repo::TransitionRepo;
pub use version_repo::VersionRepo;
