pub mod art_control_repo;
pub mod character_repo;
pub mod department_repo;
pub mod location_repo;
pub mod sequence_repo;
pub mod shot_repo;
pub mod story_asset_repo;
pub mod story_repo;
pub mod talent_assignment_repo;
pub mod talent_repo;

pub use art_control_repo::ArtControlRepo;
pub use character_repo::CharacterRepo;
pub use department_repo::{AssetDepartmentRepo, DepartmentRepo, ShotDepartmentRepo};
pub use location_repo::LocationRepo;
pub use sequence_repo::SequenceRepo;
pub use shot_repo::ShotRepo;
pub use story_asset_repo::StoryAssetRepo;
pub use story_repo::StoryRepo;
pub use talent_assignment_repo::{
    talent_cost_lines_for_story, AssetAssignmentRepo, CharacterAssignmentRepo, ShotAssignmentRepo,
};
pub use talent_repo::TalentRepo;
