mod preference;

pub use preference::UserCategoryPreference;
