//! Output artifacts: post documents and the posts search index.

mod posts;
mod search;

pub use posts::{WriteSummary, render_post, write_posts};
pub use search::{POSTS_SECTION, SearchEntry, build_search_index, write_search_index};
