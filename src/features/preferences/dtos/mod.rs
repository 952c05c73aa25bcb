mod preference_dto;

pub use preference_dto::{PreferenceResponseDto, ToggleCategoryDto, ToggleCategoryResponseDto};
