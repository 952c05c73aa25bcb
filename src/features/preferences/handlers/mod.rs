pub mod preference_handler;

pub use preference_handler::{
    __path_list_preferences, __path_toggle_category, list_preferences, toggle_category,
};
