//! Documentation UI helpers.
//!
//! The block panel shows every Twig block of the selected component with its
//! highlighted code. The story helper builds the story metadata for a
//! component from its definition.

pub mod highlight;
pub mod panel;
pub mod story;

pub use highlight::{escape_html, highlight_html};
pub use panel::{
    random_key, render_panel, PanelRegistration, PanelRenderer, ADDON_ID, PANEL_ID, PANEL_TITLE,
};
pub use story::{
    DefaultStory, Design, Story, StoryBuilder, StoryComponent, StoryOptions, StoryParameters,
};
