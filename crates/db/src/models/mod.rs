pub mod art_control;
pub mod character;
pub mod department;
pub mod location;
pub mod sequence;
pub mod shot;
pub mod status;
pub mod story;
pub mod story_asset;
pub mod talent;
pub mod talent_assignment;
