//! Repository layer for the Posts domain

mod posts;
mod versions;

pub use posts::PostRepository;
pub use versions::VersionRepository;

use pressroom_store::MemoryStore;

/// Bundle of all Posts domain repositories
#[derive(Clone)]
pub struct PostsRepositories {
    pub posts: PostRepository,
    pub versions: VersionRepository,
}

impl PostsRepositories {
    pub fn new() -> Self {
        Self {
            posts: PostRepository::new(MemoryStore::new()),
            versions: VersionRepository::new(MemoryStore::new()),
        }
    }
}

impl Default for PostsRepositories {
    fn default() -> Self {
        Self::new()
    }
}
